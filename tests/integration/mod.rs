mod logger_contracts;
mod stored_agents;
mod support;

use std::io;
use std::sync::Arc;
use std::thread;

use agentforge::logging::{ResultDisplay, Target, RECORD_SEPARATOR};
use agentforge::{AgentError, LogError, Logger};

use crate::integration::support::{Harness, CHANNELS};

#[test]
fn loggers_on_one_registry_share_sinks() {
    let harness = Harness::new("info");
    let first = harness.logger("Planner");
    let second = harness.logger("Critic");

    first.log("plan ready", "info", Target::Default).unwrap();
    second.log("plan rejected", "info", Target::Default).unwrap();

    assert_eq!(harness.registry.file_sink_count(), CHANNELS.len());
    assert_eq!(harness.registry.console_sink_count(), CHANNELS.len());
    for (a, b) in first
        .channel("AgentForge")
        .unwrap()
        .sinks()
        .iter()
        .zip(second.channel("AgentForge").unwrap().sinks())
    {
        assert!(Arc::ptr_eq(a, b));
    }

    let log = harness.log_file("AgentForge");
    assert_eq!(log.matches("[Planner] plan ready").count(), 1);
    assert_eq!(log.matches("[Critic] plan rejected").count(), 1);
    assert_eq!(log.matches(RECORD_SEPARATOR).count(), 2);

    let console = harness.console.contents();
    assert_eq!(console.matches("INFO: [Planner] plan ready\n\n").count(), 1);
}

#[test]
fn threshold_filters_and_can_be_lowered() {
    let harness = Harness::new("warning");
    let logger = harness.logger("Tuner");

    logger.log("hidden", "info", Target::Default).unwrap();
    logger.log("shown", "warning", Target::Default).unwrap();
    assert!(!harness.log_file("AgentForge").contains("hidden"));
    assert!(harness.log_file("AgentForge").contains("WARNING - [Tuner] shown"));

    logger.set_severity(Target::Default, "debug").unwrap();
    logger.log("now visible", "debug", Target::Default).unwrap();
    assert!(harness.log_file("AgentForge").contains("DEBUG - [Tuner] now visible"));

    logger.log("still hidden", "debug", "ModelIO").unwrap();
    assert!(!harness.log_file("ModelIO").contains("still hidden"));
}

#[test]
fn severity_change_applies_to_every_logger_on_the_channel() {
    let harness = Harness::new("error");
    let first = harness.logger("One");
    let second = harness.logger("Two");

    first.set_severity("all", "info").unwrap();
    second.log("via shared sink", "info", "Results").unwrap();

    // The second logger's own channel threshold is untouched.
    assert!(!harness.log_file("Results").contains("via shared sink"));

    second.set_severity("Results", "info").unwrap();
    second.log("now through", "info", "Results").unwrap();
    assert!(harness.log_file("Results").contains("[Two] now through"));
}

#[test]
fn error_records_carry_an_exception_context() {
    let harness = Harness::new("debug");
    let logger = harness.logger("Checker");

    logger.log("validation failed", "ERROR", Target::Default).unwrap();

    let console = harness.console.contents();
    assert!(console.contains("ERROR: [Checker] validation failed\n\n"));
    assert!(console.contains("ERROR: Exception Error Occurred!\n\n"));
}

#[test]
fn critical_without_a_fault_is_reported_after_writing() {
    let harness = Harness::new("debug");
    let logger = harness.logger("Guard");

    let result = logger.log("meltdown", "critical", Target::Default);

    assert!(matches!(result, Err(LogError::CriticalWithoutFault)));
    let log = harness.log_file("AgentForge");
    assert!(log.contains("CRITICAL - [Guard] meltdown"));
    assert!(log.contains("ERROR - Critical Exception Occurred!"));
}

#[test]
fn log_critical_hands_back_the_fault() {
    let harness = Harness::new("debug");
    let logger = harness.logger("Guard");

    let fault = logger.log_critical(
        "storage lost",
        AgentError::Storage("volume unmounted".to_string()),
    );

    assert!(matches!(fault, AgentError::Storage(_)));
    let log = harness.log_file("AgentForge");
    assert!(log.contains("CRITICAL - [Guard] storage lost"));
    assert!(log.contains("Critical Exception Occurred!\nStorage error: volume unmounted"));
}

#[test]
fn broadcast_reaches_every_channel() {
    let harness = Harness::new("info");
    let logger = harness.logger("Herald");

    logger.log("shutting down", "info", Target::All).unwrap();
    logger.log("and again", "info", "ALL").unwrap();

    for channel in CHANNELS {
        let log = harness.log_file(channel);
        assert!(log.contains("[Herald] shutting down"), "missing in {}", channel);
        assert!(log.contains("[Herald] and again"), "missing in {}", channel);
    }
}

#[test]
fn unknown_channel_and_level_are_rejected() {
    let harness = Harness::new("info");
    let logger = harness.logger("Typo");

    assert!(matches!(
        logger.log("hi", "info", "Metrics"),
        Err(LogError::UnknownChannel(name)) if name == "Metrics"
    ));
    assert!(matches!(
        logger.log("hi", "verbose", Target::Default),
        Err(LogError::InvalidLevel(_))
    ));
    assert!(logger.set_severity(Target::Default, "loud").is_err());
}

#[test]
fn channel_names_ignore_case() {
    let harness = Harness::new("info");
    let logger = harness.logger("Caser");

    logger.log("lower", "info", "modelio").unwrap();
    assert!(harness.log_file("ModelIO").contains("[Caser] lower"));
}

#[test]
fn disabled_logging_creates_nothing() {
    let harness = Harness::disabled();
    let logger = harness.logger("Mute");

    logger.log("nobody hears this", "error", Target::All).unwrap();
    logger.log_result("result", "Summary").unwrap();

    assert!(harness.console.contents().is_empty());
    assert!(!harness.settings.folder.exists());
    assert_eq!(harness.registry.file_sink_count(), 0);
    assert_eq!(harness.registry.console_sink_count(), 0);
}

#[test]
fn results_are_recorded_on_the_results_channel() {
    let harness = Harness::new("info");
    let logger = harness.logger("Reporter");

    logger.log_result("42 files changed", "Diff summary").unwrap();
    logger.log_info("all done").unwrap();

    let results = harness.log_file("Results");
    assert!(results.contains("INFO - [Reporter] \n42 files changed"));
    assert!(results.contains("INFO - [Reporter] \nall done"));
}

struct BrokenDisplay;

impl ResultDisplay for BrokenDisplay {
    fn show_result(&self, _description: &str, _result: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
    }

    fn show_info(&self, _message: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
    }
}

#[test]
fn display_failures_are_logged_instead_of_raised() {
    let harness = Harness::new("info");
    let logger = Logger::new("Reporter", &harness.settings, harness.registry.clone())
        .unwrap()
        .with_display(Arc::new(BrokenDisplay));

    logger.log_result("lost", "Summary").unwrap();
    logger.log_info("also lost").unwrap();

    let log = harness.log_file("AgentForge");
    assert!(log.contains("[Reporter] File operation error: terminal gone"));
    assert!(log.contains("[Reporter] Error logging message: terminal gone"));
    assert!(!harness.log_file("Results").contains("lost"));
}

#[test]
fn concurrent_writers_never_interleave_records() {
    let harness = Harness::new("info");
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = harness.logger(&format!("Thread{}", t));
            thread::spawn(move || {
                for i in 0..50 {
                    logger
                        .log(&format!("message {}", i), "info", Target::Default)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let log = harness.log_file("AgentForge");
    assert_eq!(log.matches(RECORD_SEPARATOR).count(), 400);
    for record in log.split_terminator(&format!("{}\n", RECORD_SEPARATOR)) {
        assert!(record.contains(" - INFO - [Thread"), "torn record: {:?}", record);
        assert!(record.ends_with('\n'));
    }
}

//! One loaded table plus the classify -> dispatch loop around it

use crate::command::{CommandDispatcher, Outcome, ParamSource};
use crate::core::config::AssistantConfig;
use crate::intent::{Intent, IntentClassifier};
use crate::table::Table;
use crate::ui::SessionLog;
use serde::Serialize;

/// Result of running one command
#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub command: String,
    pub intent: Intent,
    pub outcome: Outcome,
}

/// Session state: the table is fixed for the session's lifetime
pub struct Session {
    table: Table,
    classifier: IntentClassifier<'static>,
    dispatcher: CommandDispatcher,
    log: SessionLog,
}

impl Session {
    pub fn new(table: Table, config: &AssistantConfig) -> Self {
        Self {
            table,
            classifier: IntentClassifier::default(),
            dispatcher: CommandDispatcher::new(config),
            log: SessionLog::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Classify and dispatch from scratch
    ///
    /// Called again with more answers after a `NeedsInput` outcome; only
    /// completed interactions are logged.
    pub fn run(&mut self, command: &str, params: &dyn ParamSource) -> Interaction {
        let intent = self.classifier.classify(command);
        let outcome = self.dispatcher.dispatch(intent, &self.table, params);

        if !matches!(outcome, Outcome::NeedsInput(_)) {
            self.log.record(command, intent, outcome.summary());
        }

        Interaction {
            command: command.to_string(),
            intent,
            outcome,
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Wall-clock budget for a single run, in minutes.
///
/// Only the four enumerated values are accepted; anything else is a
/// dispatch input error, not something to clamp silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeoutMins {
    #[serde(rename = "5")]
    M5,
    #[serde(rename = "20")]
    M20,
    #[serde(rename = "60")]
    M60,
    #[serde(rename = "240")]
    M240,
}

impl TimeoutMins {
    pub fn minutes(&self) -> u64 {
        match self {
            TimeoutMins::M5 => 5,
            TimeoutMins::M20 => 20,
            TimeoutMins::M60 => 60,
            TimeoutMins::M240 => 240,
        }
    }

    /// Value as it appears on the external program's command line.
    pub fn as_arg(&self) -> &'static str {
        match self {
            TimeoutMins::M5 => "5",
            TimeoutMins::M20 => "20",
            TimeoutMins::M60 => "60",
            TimeoutMins::M240 => "240",
        }
    }
}

impl Default for TimeoutMins {
    fn default() -> Self {
        TimeoutMins::M240
    }
}

impl FromStr for TimeoutMins {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5" => Ok(TimeoutMins::M5),
            "20" => Ok(TimeoutMins::M20),
            "60" => Ok(TimeoutMins::M60),
            "240" => Ok(TimeoutMins::M240),
            _ => Err(ParseError::InvalidTimeout(s.to_string())),
        }
    }
}

impl fmt::Display for TimeoutMins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Continuation hint consumed entirely by the external program.
///
/// This layer only resolves and forwards it; whether a run performs a
/// single pass or keeps going is the external program's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    OneAndDone,
    OneOrMore,
    Continuing,
}

impl TriggerMode {
    pub fn as_arg(&self) -> &'static str {
        match self {
            TriggerMode::OneAndDone => "oneanddone",
            TriggerMode::OneOrMore => "oneormore",
            TriggerMode::Continuing => "continuing",
        }
    }
}

impl Default for TriggerMode {
    fn default() -> Self {
        TriggerMode::OneOrMore
    }
}

impl FromStr for TriggerMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oneanddone" => Ok(TriggerMode::OneAndDone),
            "oneormore" => Ok(TriggerMode::OneOrMore),
            "continuing" => Ok(TriggerMode::Continuing),
            _ => Err(ParseError::InvalidTriggerMode(s.to_string())),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Worker-pool size forwarded to the external program.
///
/// Not concurrency managed by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxWorkers {
    #[serde(rename = "1")]
    W1,
    #[serde(rename = "2")]
    W2,
    #[serde(rename = "4")]
    W4,
}

impl MaxWorkers {
    pub fn count(&self) -> usize {
        match self {
            MaxWorkers::W1 => 1,
            MaxWorkers::W2 => 2,
            MaxWorkers::W4 => 4,
        }
    }

    pub fn as_arg(&self) -> &'static str {
        match self {
            MaxWorkers::W1 => "1",
            MaxWorkers::W2 => "2",
            MaxWorkers::W4 => "4",
        }
    }
}

impl Default for MaxWorkers {
    fn default() -> Self {
        MaxWorkers::W4
    }
}

impl FromStr for MaxWorkers {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MaxWorkers::W1),
            "2" => Ok(MaxWorkers::W2),
            "4" => Ok(MaxWorkers::W4),
            _ => Err(ParseError::InvalidMaxWorkers(s.to_string())),
        }
    }
}

impl fmt::Display for MaxWorkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Explicit overrides supplied on manual dispatch.
///
/// All-`None` is equivalent to a scheduled activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchInputs {
    pub timeout_mins: Option<TimeoutMins>,
    pub trigger_mode: Option<TriggerMode>,
    pub max_workers: Option<MaxWorkers>,
}

impl DispatchInputs {
    pub fn is_empty(&self) -> bool {
        self.timeout_mins.is_none() && self.trigger_mode.is_none() && self.max_workers.is_none()
    }
}

/// Resolved run parameters, immutable for the lifetime of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    pub timeout: TimeoutMins,
    pub trigger_mode: TriggerMode,
    pub max_workers: MaxWorkers,
}

impl RunConfiguration {
    /// Apply explicit dispatch inputs over the schedule defaults.
    ///
    /// Resolution is total: any combination of present and absent inputs
    /// yields a configuration. Supplied values are taken exactly as given.
    pub fn resolve(inputs: &DispatchInputs) -> Self {
        Self {
            timeout: inputs.timeout_mins.unwrap_or_default(),
            trigger_mode: inputs.trigger_mode.unwrap_or_default(),
            max_workers: inputs.max_workers.unwrap_or_default(),
        }
    }

    /// Command-line encoding for the parameterized job variant.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--timeout-mins".to_string(),
            self.timeout.as_arg().to_string(),
            "--trigger-mode".to_string(),
            self.trigger_mode.as_arg().to_string(),
            "--max-workers".to_string(),
            self.max_workers.as_arg().to_string(),
        ]
    }

    /// Environment encoding, passed to both job variants.
    pub fn to_env(&self) -> Vec<(String, String)> {
        vec![
            ("TIMEOUT_MINS".to_string(), self.timeout.as_arg().to_string()),
            ("TRIGGER_MODE".to_string(), self.trigger_mode.as_arg().to_string()),
            ("MAX_WORKERS".to_string(), self.max_workers.as_arg().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_schedule_case() {
        let cfg = RunConfiguration::default();
        assert_eq!(cfg.timeout, TimeoutMins::M240);
        assert_eq!(cfg.trigger_mode, TriggerMode::OneOrMore);
        assert_eq!(cfg.max_workers, MaxWorkers::W4);
    }

    #[test]
    fn resolve_without_inputs_equals_defaults() {
        let cfg = RunConfiguration::resolve(&DispatchInputs::default());
        assert_eq!(cfg, RunConfiguration::default());
    }

    #[test]
    fn resolve_takes_supplied_inputs_exactly() {
        let inputs = DispatchInputs {
            timeout_mins: Some(TimeoutMins::M5),
            trigger_mode: Some(TriggerMode::OneAndDone),
            max_workers: Some(MaxWorkers::W1),
        };
        let cfg = RunConfiguration::resolve(&inputs);
        assert_eq!(cfg.timeout, TimeoutMins::M5);
        assert_eq!(cfg.trigger_mode, TriggerMode::OneAndDone);
        assert_eq!(cfg.max_workers, MaxWorkers::W1);
    }

    #[test]
    fn resolve_is_per_field() {
        let inputs = DispatchInputs {
            timeout_mins: None,
            trigger_mode: Some(TriggerMode::Continuing),
            max_workers: None,
        };
        let cfg = RunConfiguration::resolve(&inputs);
        assert_eq!(cfg.timeout, TimeoutMins::M240);
        assert_eq!(cfg.trigger_mode, TriggerMode::Continuing);
        assert_eq!(cfg.max_workers, MaxWorkers::W4);
    }

    #[test]
    fn default_args_encoding() {
        let args = RunConfiguration::default().to_args();
        assert_eq!(
            args,
            vec![
                "--timeout-mins",
                "240",
                "--trigger-mode",
                "oneormore",
                "--max-workers",
                "4",
            ]
        );
    }

    #[test]
    fn override_args_encoding() {
        let cfg = RunConfiguration::resolve(&DispatchInputs {
            timeout_mins: Some(TimeoutMins::M5),
            trigger_mode: Some(TriggerMode::OneAndDone),
            max_workers: Some(MaxWorkers::W1),
        });
        assert_eq!(
            cfg.to_args(),
            vec![
                "--timeout-mins",
                "5",
                "--trigger-mode",
                "oneanddone",
                "--max-workers",
                "1",
            ]
        );
    }

    #[test]
    fn env_encoding_mirrors_args() {
        let env = RunConfiguration::default().to_env();
        assert_eq!(
            env,
            vec![
                ("TIMEOUT_MINS".to_string(), "240".to_string()),
                ("TRIGGER_MODE".to_string(), "oneormore".to_string()),
                ("MAX_WORKERS".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn timeout_from_str() {
        assert_eq!("5".parse::<TimeoutMins>().unwrap(), TimeoutMins::M5);
        assert_eq!("240".parse::<TimeoutMins>().unwrap(), TimeoutMins::M240);
        assert!("30".parse::<TimeoutMins>().is_err());
        assert!("".parse::<TimeoutMins>().is_err());
    }

    #[test]
    fn trigger_mode_from_str() {
        assert_eq!(
            "oneanddone".parse::<TriggerMode>().unwrap(),
            TriggerMode::OneAndDone
        );
        assert_eq!(
            "Continuing".parse::<TriggerMode>().unwrap(),
            TriggerMode::Continuing
        );
        assert!("always".parse::<TriggerMode>().is_err());
    }

    #[test]
    fn max_workers_from_str() {
        assert_eq!("1".parse::<MaxWorkers>().unwrap(), MaxWorkers::W1);
        assert_eq!("4".parse::<MaxWorkers>().unwrap(), MaxWorkers::W4);
        assert!("8".parse::<MaxWorkers>().is_err());
    }

    #[test]
    fn timeout_minutes_values() {
        assert_eq!(TimeoutMins::M5.minutes(), 5);
        assert_eq!(TimeoutMins::M240.minutes(), 240);
        assert_eq!(MaxWorkers::W2.count(), 2);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = RunConfiguration::resolve(&DispatchInputs {
            timeout_mins: Some(TimeoutMins::M20),
            trigger_mode: Some(TriggerMode::Continuing),
            max_workers: Some(MaxWorkers::W2),
        });
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(
            json,
            r#"{"timeout":"20","triggerMode":"continuing","maxWorkers":"2"}"#
        );
        let back: RunConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}

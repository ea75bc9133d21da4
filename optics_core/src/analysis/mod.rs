//! # Analysis Services
//!
//! Thin abstraction over an external text-completion model for the
//! judgement-based tools (Rx tolerance verification, dispensing
//! troubleshooting). The contract is deliberately minimal: format a
//! prompt, send it, parse the structured JSON reply. There is no retry,
//! caching, or queueing; a transport failure surfaces as a recoverable
//! [`OpticsError::ServiceError`] and a malformed reply as
//! [`OpticsError::SerializationError`].
//!
//! The core ships no concrete client. Consumers implement
//! [`CompletionService`] over whatever transport they use; tests use an
//! in-memory mock.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{OpticsError, OpticsResult};

/// A single request to the completion model: the prompt text plus a JSON
/// schema hint describing the structured reply we expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Fully formatted prompt text
    pub prompt: String,

    /// JSON schema the model is asked to answer in
    pub response_schema: Value,
}

/// Capability to complete a prompt into a structured JSON value.
///
/// One operation, one response, no orchestration.
pub trait CompletionService {
    /// Send the prompt and return the model's structured reply.
    fn complete(&self, request: &CompletionRequest) -> OpticsResult<Value>;
}

/// A prescription as written on an order or read off a focimeter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RxSpec {
    /// Sphere power, diopters
    pub sphere_d: f64,
    /// Cylinder power, diopters
    pub cylinder_d: f64,
    /// Cylinder axis, degrees
    pub axis_deg: f64,
    /// Add power, diopters, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_d: Option<f64>,
}

impl RxSpec {
    fn describe(&self) -> String {
        let mut s = format!(
            "{:+.2} {:+.2} x {:.0}",
            self.sphere_d, self.cylinder_d, self.axis_deg
        );
        if let Some(add) = self.add_d {
            s.push_str(&format!(" Add {:+.2}", add));
        }
        s
    }
}

/// One ordered-vs-measured discrepancy in a tolerance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceFinding {
    /// Parameter the finding concerns (e.g. "sphere", "axis")
    pub parameter: String,
    /// Whether this parameter is within tolerance
    pub within_tolerance: bool,
    /// Model's explanation of the finding
    pub note: String,
}

/// Structured reply from the Rx tolerance check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RxToleranceReport {
    /// Overall verdict across all parameters
    pub within_tolerance: bool,
    /// Per-parameter findings
    pub findings: Vec<ToleranceFinding>,
}

/// Structured reply from the dispensing troubleshooter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroubleshootingReport {
    /// Likely causes of the complaint, most likely first
    pub probable_causes: Vec<String>,
    /// Concrete actions for the dispenser to take
    pub recommended_actions: Vec<String>,
}

/// Build the Rx tolerance prompt: ordered vs. measured prescription,
/// judged against ANSI Z80.1 style tolerances.
pub fn rx_tolerance_request(ordered: &RxSpec, measured: &RxSpec) -> CompletionRequest {
    CompletionRequest {
        prompt: format!(
            "You are verifying a finished spectacle lens against its order \
             using standard ophthalmic tolerances (ANSI Z80.1).\n\
             Ordered: {}\nMeasured: {}\n\
             For each parameter (sphere, cylinder, axis, add) state whether \
             the measured value is within tolerance and give an overall \
             verdict. Answer only in the requested JSON format.",
            ordered.describe(),
            measured.describe()
        ),
        response_schema: json!({
            "within_tolerance": "boolean",
            "findings": [
                { "parameter": "string", "within_tolerance": "boolean", "note": "string" }
            ]
        }),
    }
}

/// Build the troubleshooting prompt from a patient complaint and the Rx
/// involved.
pub fn troubleshooting_request(complaint: &str, rx: &RxSpec) -> CompletionRequest {
    CompletionRequest {
        prompt: format!(
            "A patient with prescription {} reports the following problem \
             with new spectacles:\n{complaint}\n\
             List the probable dispensing causes in order of likelihood and \
             the recommended corrective actions. Answer only in the \
             requested JSON format.",
            rx.describe()
        ),
        response_schema: json!({
            "probable_causes": ["string"],
            "recommended_actions": ["string"]
        }),
    }
}

fn parse_reply<T: serde::de::DeserializeOwned>(value: Value) -> OpticsResult<T> {
    serde_json::from_value(value).map_err(|e| OpticsError::SerializationError {
        reason: format!("malformed analysis reply: {e}"),
    })
}

/// Run the Rx tolerance check end to end: build the prompt, complete it,
/// parse the structured report.
pub fn run_rx_tolerance(
    service: &impl CompletionService,
    ordered: &RxSpec,
    measured: &RxSpec,
) -> OpticsResult<RxToleranceReport> {
    let request = rx_tolerance_request(ordered, measured);
    parse_reply(service.complete(&request)?)
}

/// Run the dispensing troubleshooter end to end.
pub fn run_troubleshooting(
    service: &impl CompletionService,
    complaint: &str,
    rx: &RxSpec,
) -> OpticsResult<TroubleshootingReport> {
    let request = troubleshooting_request(complaint, rx);
    parse_reply(service.complete(&request)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock service returning a canned reply, or failing.
    struct MockService {
        reply: Result<Value, String>,
    }

    impl CompletionService for MockService {
        fn complete(&self, _request: &CompletionRequest) -> OpticsResult<Value> {
            self.reply
                .clone()
                .map_err(|reason| OpticsError::service_error("mock", reason))
        }
    }

    fn sample_rx() -> RxSpec {
        RxSpec {
            sphere_d: -2.0,
            cylinder_d: -0.75,
            axis_deg: 180.0,
            add_d: None,
        }
    }

    #[test]
    fn test_prompt_carries_both_prescriptions() {
        let measured = RxSpec {
            sphere_d: -2.25,
            ..sample_rx()
        };
        let request = rx_tolerance_request(&sample_rx(), &measured);
        assert!(request.prompt.contains("-2.00 -0.75 x 180"));
        assert!(request.prompt.contains("-2.25 -0.75 x 180"));
    }

    #[test]
    fn test_tolerance_flow_parses_reply() {
        let service = MockService {
            reply: Ok(json!({
                "within_tolerance": false,
                "findings": [
                    { "parameter": "sphere", "within_tolerance": false,
                      "note": "0.25 D over on a -2.00 D sphere" }
                ]
            })),
        };
        let report = run_rx_tolerance(&service, &sample_rx(), &sample_rx()).unwrap();
        assert!(!report.within_tolerance);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].parameter, "sphere");
    }

    #[test]
    fn test_malformed_reply_is_serialization_error() {
        let service = MockService {
            reply: Ok(json!({ "unexpected": true })),
        };
        let err = run_rx_tolerance(&service, &sample_rx(), &sample_rx()).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_transport_failure_is_service_error() {
        let service = MockService {
            reply: Err("connection refused".to_string()),
        };
        let err = run_troubleshooting(&service, "ghosting at near", &sample_rx()).unwrap_err();
        assert_eq!(err.error_code(), "SERVICE_ERROR");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_troubleshooting_flow() {
        let service = MockService {
            reply: Ok(json!({
                "probable_causes": ["vertex distance increased", "axis off"],
                "recommended_actions": ["check fitting", "re-verify axis"]
            })),
        };
        let report =
            run_troubleshooting(&service, "blur at distance", &sample_rx()).unwrap();
        assert_eq!(report.probable_causes.len(), 2);
        assert_eq!(report.recommended_actions.len(), 2);
    }
}

// crates/horizon-field/src/metric.rs
//
// ScriptMetric: PairMetric backed by an external reference script.
//
// The script is invoked as `<interpreter> <script> phi <A> <B> [--norm]` and
// prints a single JSON object `{"phi": f, "phi_norm": f}` on stdout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use horizon_core::{HorizonError, PairMetric, PairScore};

#[derive(Debug, Deserialize)]
struct ScriptOutput {
    phi: f64,
    #[serde(default)]
    phi_norm: Option<f64>,
}

/// Parse the metric script's stdout.
///
/// When `norm` was requested a missing `phi_norm` counts as 0.0; otherwise
/// any reported `phi_norm` is dropped.
pub fn parse_metric_output(stdout: &str, norm: bool) -> Result<PairScore, HorizonError> {
    let out: ScriptOutput = serde_json::from_str(stdout.trim())
        .map_err(|e| HorizonError::Metric(format!("unparsable metric output {:?}: {}", stdout.trim(), e)))?;
    if !out.phi.is_finite() {
        return Err(HorizonError::Metric(format!("non-finite phi: {}", out.phi)));
    }
    Ok(PairScore {
        phi: out.phi,
        phi_norm: if norm {
            Some(out.phi_norm.unwrap_or(0.0))
        } else {
            None
        },
    })
}

/// Pair metric computed by a subprocess.
#[derive(Debug, Clone)]
pub struct ScriptMetric {
    /// Program used to run the script (e.g. "python3").
    pub interpreter: String,
    /// Path to the reference metric script.
    pub script: PathBuf,
}

impl ScriptMetric {
    pub fn new(interpreter: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
        }
    }
}

#[async_trait]
impl PairMetric for ScriptMetric {
    async fn phi(&self, a: &Path, b: &Path, norm: bool) -> Result<PairScore, HorizonError> {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.script).arg("phi").arg(a).arg(b);
        if norm {
            cmd.arg("--norm");
        }
        // Pin locale and timezone so the script's output is reproducible.
        cmd.env("LC_ALL", "C").env("TZ", "UTC");

        let output = cmd.output().await.map_err(|e| {
            HorizonError::Metric(format!(
                "failed to run {} {}: {}",
                self.interpreter,
                self.script.display(),
                e
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(HorizonError::Metric(format!(
                "metric script exited with {}: {}",
                output.status, detail
            )));
        }

        let score = parse_metric_output(&stdout, norm)?;
        debug!(a = %a.display(), b = %b.display(), phi = score.phi, "pair metric");
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_plain_output() {
        let score = parse_metric_output("{\"phi\": 4.2}\n", false).unwrap();
        assert_eq!(score.phi, 4.2);
        assert_eq!(score.phi_norm, None);
    }

    #[test]
    fn test_parse_norm_defaults_to_zero() {
        let score = parse_metric_output("{\"phi\": 1.0}", true).unwrap();
        assert_eq!(score.phi_norm, Some(0.0));

        let score = parse_metric_output("{\"phi\": 1.0, \"phi_norm\": 0.25}", true).unwrap();
        assert_eq!(score.phi_norm, Some(0.25));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        let err = parse_metric_output("not json", false).unwrap_err();
        assert!(matches!(err, HorizonError::Metric(_)));
        assert!(parse_metric_output("{\"other\": 1}", false).is_err());
    }

    #[tokio::test]
    async fn test_script_metric_runs_subprocess() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("metric.sh");
        // $1 = "phi", $2/$3 = node paths, $4 = optional --norm.
        fs::write(
            &script,
            "if [ \"$4\" = \"--norm\" ]; then echo '{\"phi\": 2.5, \"phi_norm\": 0.5}'; else echo '{\"phi\": 2.5}'; fi\n",
        )
        .unwrap();

        let metric = ScriptMetric::new("sh", &script);
        let score = metric
            .phi(Path::new("a"), Path::new("b"), false)
            .await
            .unwrap();
        assert_eq!(score, PairScore { phi: 2.5, phi_norm: None });

        let score = metric.phi(Path::new("a"), Path::new("b"), true).await.unwrap();
        assert_eq!(score.phi_norm, Some(0.5));
    }

    #[tokio::test]
    async fn test_script_failure_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("broken.sh");
        fs::write(&script, "echo 'boom' >&2\nexit 3\n").unwrap();

        let metric = ScriptMetric::new("sh", &script);
        let err = metric
            .phi(Path::new("a"), Path::new("b"), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}

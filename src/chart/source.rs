//! External chart-computation collaborator.

use async_trait::async_trait;

use crate::chart::ChartRequest;
use crate::error::ChartError;

/// Output of the chart collaborator: the raw report plus, best-effort, a
/// rendered chart image.
#[derive(Debug, Clone)]
pub struct RawChart {
    pub report: String,
    pub image: Option<Vec<u8>>,
}

/// Seam for the ephemeris computation. Implemented by [`ChartCommand`] in
/// production and by mocks in tests.
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn compute(&self, request: &ChartRequest) -> Result<RawChart, ChartError>;
}

/// Chart source that shells out to a configured command.
///
/// The command receives the birth facts as positional arguments
/// (`name year month day hour minute location country-code`) and prints the
/// full report on stdout. With `--image <path>` it may additionally write a
/// chart wheel; the file lives in a temp dir scoped to this one call and is
/// removed on every exit path.
pub struct ChartCommand {
    program: String,
    render_image: bool,
}

impl ChartCommand {
    pub fn new(program: impl Into<String>, render_image: bool) -> Self {
        Self {
            program: program.into(),
            render_image,
        }
    }
}

#[async_trait]
impl ChartSource for ChartCommand {
    async fn compute(&self, request: &ChartRequest) -> Result<RawChart, ChartError> {
        let workdir = tempfile::tempdir()?;
        let image_path = workdir.path().join("chart.png");

        let mut command = tokio::process::Command::new(&self.program);
        command
            .arg(&request.name)
            .arg(request.year.to_string())
            .arg(request.month.to_string())
            .arg(request.day.to_string())
            .arg(request.hour.to_string())
            .arg(request.minute.to_string())
            .arg(&request.location)
            .arg(&request.country_code);
        if self.render_image {
            command.arg("--image").arg(&image_path);
        }

        let output = command
            .output()
            .await
            .map_err(|e| ChartError::Command(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChartError::Command(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let report = String::from_utf8_lossy(&output.stdout).into_owned();

        // Image is a best-effort side artifact: a missing or unreadable file
        // is logged and skipped, never fatal.
        let image = if self.render_image {
            match tokio::fs::read(&image_path).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!("chart image not available: {e}");
                    None
                }
            }
        } else {
            None
        };

        Ok(RawChart { report, image })
    }
}

//! Chart/prediction orchestrator.
//!
//! Given a complete [`ChartRequest`]: compute the chart, format the report,
//! keep the best-effort image, build the persona prompt and fetch the
//! narrative. A chart failure fails the whole call; a prediction failure is
//! carried inside the [`Reading`] so the caller can substitute a fallback.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chart::report::format_report;
use crate::chart::{ChartRequest, ChartSource};
use crate::error::{ChartError, PredictionError};
use crate::llm::LlmProvider;

/// Fixed persona of the reading. The system string every completion runs
/// under.
pub const PERSONA: &str = "Eres una experta bruja en leer a las personas a través de sus cartas \
astrales. Usa tu habilidad para revelar detalles precisos y profundos sobre sus vidas, \
intereses y personalidades.";

/// One complete reading: the formatted chart, an optional rendered image,
/// and the narrative or the typed failure that replaced it.
#[derive(Debug)]
pub struct Reading {
    pub chart_text: String,
    pub image: Option<Vec<u8>>,
    pub narrative: Result<String, PredictionError>,
}

/// Seam between the dialogue controller and reading generation.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn generate(&self, request: &ChartRequest) -> Result<Reading, ChartError>;
}

pub struct Orchestrator {
    chart: Arc<dyn ChartSource>,
    llm: Arc<dyn LlmProvider>,
    report_width: usize,
}

impl Orchestrator {
    pub fn new(chart: Arc<dyn ChartSource>, llm: Arc<dyn LlmProvider>, report_width: usize) -> Self {
        Self {
            chart,
            llm,
            report_width,
        }
    }
}

#[async_trait]
impl ReadingSource for Orchestrator {
    async fn generate(&self, request: &ChartRequest) -> Result<Reading, ChartError> {
        let raw = self.chart.compute(request).await?;
        let chart_text = format_report(&raw.report, self.report_width)?;

        let prompt = reading_prompt(&chart_text, &request.name, &request.location);
        let narrative = self.llm.complete(PERSONA, &prompt).await;
        if let Err(ref e) = narrative {
            tracing::error!("prediction failed: {e}");
        }

        Ok(Reading {
            chart_text,
            image: raw.image,
            narrative,
        })
    }
}

/// Build the single prompt sent to the completion service: persona framing,
/// the formatted chart, the subject's name and location.
fn reading_prompt(chart: &str, name: &str, location: &str) -> String {
    format!(
        "Tú eres una bruja hábil en leer a las personas. Aquí está la carta astral de \
alguien especial. Basándote en ella, realiza una lectura profunda sobre esta persona. \
Sumérgete en aspectos clave como pasatiempos, familia, trabajo y vida amorosa:\n\n\
{chart}\n\n\
La persona se llama {name}. Háblale a {name} en segunda persona, como si le estuvieras \
hablando directamente. No menciones la carta astral; úsala solo como guía en tus \
predicciones. Imagina sus aficiones y lo que más valora en la vida cotidiana. \
Vive en {location}."
    )
}

use crate::dom::{ids, Page, SharedPage};
use crate::error::{Result, ScreeningError};
use crate::export::ReportExporter;
use crate::flow::events::{Control, EventOutcome, SubmitOutcome, UiEvent};
use crate::flow::guard::SingleFlight;
use crate::form::{FieldNormalizer, FormSchema, FormState};
use crate::renderers::ResultRenderer;
use crate::traits::{Notifier, PdfConverter, PredictionService};
use crate::types::PredictionResponse;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const PREDICT_PROGRESS_LABEL: &str = "⏳ Menjalankan Inferensi...";
pub const RESET_PROMPT: &str = "Reset data?";
/// Prefix of every failure reported by the prediction service itself
pub const FAILURE_PREFIX: &str = "Analisis Gagal: ";
const FAILURE_FALLBACK: &str = "Gagal menghubungi server.";

/// Wires the form, the prediction service, the report page and the export
/// path together behind named event handlers.
///
/// Handlers take `&self` and may run concurrently on one task; submit and
/// export each hold a [`SingleFlight`] permit for their whole duration.
pub struct PredictionFlow<S, N, C> {
    service: S,
    notifier: N,
    converter: C,
    page: SharedPage,
    form: Mutex<FormState>,
    schema: FormSchema,
    normalizer: FieldNormalizer,
    renderer: ResultRenderer,
    exporter: ReportExporter,
    submit_guard: SingleFlight,
    export_guard: SingleFlight,
}

impl<S, N, C> PredictionFlow<S, N, C>
where
    S: PredictionService,
    N: Notifier,
    C: PdfConverter,
{
    pub fn new(service: S, notifier: N, converter: C) -> Self {
        Self {
            service,
            notifier,
            converter,
            page: SharedPage::new(Page::new()),
            form: Mutex::new(FormState::new()),
            schema: FormSchema::default(),
            normalizer: FieldNormalizer::new(),
            renderer: ResultRenderer::new(),
            exporter: ReportExporter::new(),
            submit_guard: SingleFlight::new("prediksi"),
            export_guard: SingleFlight::new("export PDF"),
        }
    }

    pub fn with_schema(mut self, schema: FormSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_exporter(mut self, exporter: ReportExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = SharedPage::new(page);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    pub fn form_snapshot(&self) -> FormState {
        self.form().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_guard.is_in_flight()
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Route a UI event to its handler
    pub async fn dispatch(&self, event: UiEvent) -> Result<EventOutcome> {
        match event {
            UiEvent::Submit | UiEvent::Click(Control::Predict) => {
                self.handle_submit().await.map(EventOutcome::Submitted)
            }
            UiEvent::InputChanged { field, value } => Ok(EventOutcome::InputUpdated {
                bmi: self.handle_input(&field, &value),
            }),
            UiEvent::Click(Control::Reset) => Ok(EventOutcome::Reset {
                confirmed: self.handle_reset(),
            }),
            UiEvent::Click(Control::ExportPdf) => {
                self.handle_export().await.map(EventOutcome::Exported)
            }
        }
    }

    /// Input-changed handler; returns the recomputed BMI, if any
    pub fn handle_input(&self, field: &str, value: &str) -> Option<String> {
        self.form().set_field(field, value)
    }

    /// Apply many edits in order, as if typed one after another
    pub fn fill<'a, I>(&self, entries: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut form = self.form();
        for (field, value) in entries {
            form.set_field(field, value);
        }
    }

    /// Submit handler.
    ///
    /// Fails only with [`ScreeningError::Busy`] when a submission is already
    /// outstanding. Every other failure is alerted once and reported as
    /// [`SubmitOutcome::Failed`], with nothing rendered.
    pub async fn handle_submit(&self) -> Result<SubmitOutcome> {
        let _permit = self.submit_guard.try_acquire()?;

        let (validity, request) = {
            let form = self.form();
            (self.schema.check_validity(&form), form.to_request(&self.normalizer))
        };
        if !validity.is_valid() {
            tracing::debug!(missing = ?validity.missing, "Submission blocked by form validation");
            return Ok(SubmitOutcome::Invalid(validity));
        }

        let saved_label = self.page.with(|page| {
            let saved = page.begin_busy(ids::BTN_PREDICT, PREDICT_PROGRESS_LABEL);
            page.hide_result();
            saved
        });

        let outcome = match self.service.diagnose(&request).await {
            Ok(PredictionResponse::Success(outcome)) => {
                match self.page.with(|page| self.renderer.render(page, &outcome)) {
                    Ok(()) => {
                        self.notifier.scroll_into_view(ids::RESULT_CONTAINER);
                        SubmitOutcome::Rendered(Box::new(outcome))
                    }
                    Err(error) => self.fail(error.user_message()),
                }
            }
            Ok(PredictionResponse::Failure { error }) => {
                let reason = error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| FAILURE_FALLBACK.to_string());
                self.fail(format!("{FAILURE_PREFIX}{reason}"))
            }
            Err(ScreeningError::Api { status, message }) => {
                tracing::error!(status, message = %message, "Prediction rejected by the service");
                self.fail(format!("{FAILURE_PREFIX}{message}"))
            }
            Err(error) => {
                tracing::error!(error = %error, "Prediction request failed");
                self.fail(error.user_message())
            }
        };

        self.page
            .with(|page| page.end_busy(ids::BTN_PREDICT, saved_label));
        Ok(outcome)
    }

    fn fail(&self, message: String) -> SubmitOutcome {
        self.notifier.alert(&message);
        SubmitOutcome::Failed { message }
    }

    /// Reset handler; asks for confirmation first
    pub fn handle_reset(&self) -> bool {
        if !self.notifier.confirm(RESET_PROMPT) {
            return false;
        }
        self.form().reset();
        self.page.with(Page::hide_result);
        true
    }

    /// Export handler. Only a visible report can be exported.
    pub async fn handle_export(&self) -> Result<PathBuf> {
        let _permit = self.export_guard.try_acquire()?;

        if !self.page.with(|page| page.is_result_visible()) {
            return Err(ScreeningError::export("Belum ada hasil diagnosa untuk diekspor."));
        }

        self.exporter.export(&self.page, &self.converter).await
    }
}

use crate::dom::element::Element;
use crate::error::{Result, ScreeningError};
use std::sync::{Mutex, PoisonError};

/// Element ids of the fixed report layout
pub mod ids {
    pub const PREDICTION_FORM: &str = "predictionForm";
    pub const BTN_PREDICT: &str = "btnPredict";
    pub const BTN_RESET: &str = "resetBtn";
    pub const RESULT_CONTAINER: &str = "resultContainer";
    pub const RES_LABEL: &str = "resLabel";
    pub const RES_RISK: &str = "resRisk";
    pub const RES_PROB: &str = "resProb";
    pub const MOD_NAME: &str = "modName";
    pub const MOD_METHOD: &str = "modMethod";
    pub const MOD_ACC: &str = "modAcc";
    pub const INPUT_LIST: &str = "inputList";
    pub const FEAT_LIST: &str = "featList";
    pub const BTN_PDF: &str = "btnPdf";
}

pub const PREDICT_LABEL: &str = "🔍 Prediksi Risiko";
pub const RESET_LABEL: &str = "↺ Reset";
pub const EXPORT_LABEL: &str = "📄 Export PDF";

/// The live document: the form controls and the (initially hidden) report
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    body: Element,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Build the standard layout
    pub fn new() -> Self {
        let form = Element::new("form")
            .with_id(ids::PREDICTION_FORM)
            .with_child(button(ids::BTN_PREDICT, PREDICT_LABEL))
            .with_child(button(ids::BTN_RESET, RESET_LABEL));

        let header_card = Element::new("div")
            .with_class("result-header-card")
            .with_style("background: #1e293b; box-shadow: 0 4px 12px rgba(0,0,0,0.4); color: #f8fafc")
            .with_child(Element::new("h2").with_id(ids::RES_LABEL))
            .with_child(metric_row("Tingkat Risiko", ids::RES_RISK))
            .with_child(metric_row("Probabilitas", ids::RES_PROB));

        let model_card = info_card("Informasi Model")
            .with_child(metric_row("Algoritma", ids::MOD_NAME))
            .with_child(metric_row("Validasi", ids::MOD_METHOD))
            .with_child(metric_row("Akurasi", ids::MOD_ACC));

        let input_card = info_card("Data Pasien").with_child(Element::new("ul").with_id(ids::INPUT_LIST));
        let factor_card =
            info_card("Faktor Dominan").with_child(Element::new("ul").with_id(ids::FEAT_LIST));

        let result_container = Element::new("div")
            .with_id(ids::RESULT_CONTAINER)
            .with_class("result-container")
            .with_style("display: none; background: #0f172a; color: #e2e8f0")
            .with_child(header_card)
            .with_child(model_card)
            .with_child(input_card)
            .with_child(factor_card)
            .with_child(button(ids::BTN_PDF, EXPORT_LABEL));

        Self::from_body(
            Element::new("body")
                .with_child(form)
                .with_child(result_container),
        )
    }

    /// Wrap an arbitrary body, e.g. a custom layout using the same ids
    pub fn from_body(body: Element) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    /// Like [`Page::element_mut`], failing when the layout lacks the id
    pub fn require_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.body
            .find_by_id_mut(id)
            .ok_or_else(|| ScreeningError::missing_element(id))
    }

    pub fn text_of(&self, id: &str) -> Option<String> {
        self.element(id).map(Element::text_content)
    }

    /// Disable a control and swap its label for a progress indicator.
    /// Returns the saved label, or `None` when the control is absent.
    pub fn begin_busy(&mut self, id: &str, progress_label: &str) -> Option<String> {
        let control = self.element_mut(id)?;
        let saved = control.text.clone().unwrap_or_default();
        control.text = Some(progress_label.to_string());
        control
            .attributes
            .insert("disabled".to_string(), "disabled".to_string());
        Some(saved)
    }

    /// Re-enable a control and put back the label saved by [`Page::begin_busy`]
    pub fn end_busy(&mut self, id: &str, saved_label: Option<String>) {
        let Some(label) = saved_label else {
            return;
        };
        if let Some(control) = self.element_mut(id) {
            control.text = Some(label);
            control.attributes.remove("disabled");
        }
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.element(id)
            .is_some_and(|control| control.attributes.contains_key("disabled"))
    }

    pub fn show_result(&mut self) {
        if let Some(container) = self.element_mut(ids::RESULT_CONTAINER) {
            container.style.set("display", "block");
        }
    }

    pub fn hide_result(&mut self) {
        if let Some(container) = self.element_mut(ids::RESULT_CONTAINER) {
            container.style.set("display", "none");
        }
    }

    pub fn is_result_visible(&self) -> bool {
        self.element(ids::RESULT_CONTAINER)
            .is_some_and(|container| container.style.get("display") != Some("none"))
    }

    pub fn append_to_body(&mut self, element: Element) {
        self.body.children.push(element);
    }

    pub fn remove_from_body(&mut self, id: &str) -> Option<Element> {
        let index = self.body.children.iter().position(|child| child.is_id(id))?;
        Some(self.body.children.remove(index))
    }

    /// Full HTML document of the page
    pub fn to_document(&self) -> String {
        html_document("Hasil Skrining Diabetes", &self.body.to_html())
    }
}

/// Wrap serialized content in a minimal standalone HTML document
pub fn html_document(title: &str, body_html: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n{}\n</html>\n",
        super::element::html_escape(title),
        body_html
    )
}

fn button(id: &str, label: &str) -> Element {
    Element::new("button")
        .with_id(id)
        .with_attribute("type", "button")
        .with_text(label)
}

fn info_card(title: &str) -> Element {
    Element::new("div")
        .with_class("info-card")
        .with_style("background: #1e293b; box-shadow: 0 2px 8px rgba(0,0,0,0.3)")
        .with_child(Element::new("h3").with_text(title))
}

fn metric_row(label: &str, value_id: &str) -> Element {
    Element::new("p")
        .with_child(Element::new("span").with_text(format!("{label}: ")))
        .with_child(Element::new("strong").with_id(value_id))
}

/// The page shared between event handlers.
///
/// Access goes through [`SharedPage::with`] so no lock is ever held across
/// an await point.
#[derive(Debug, Default)]
pub struct SharedPage(Mutex<Page>);

impl SharedPage {
    pub fn new(page: Page) -> Self {
        Self(Mutex::new(page))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        let mut page = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut page)
    }

    /// Copy of the current page state
    pub fn snapshot(&self) -> Page {
        self.with(|page| page.clone())
    }
}

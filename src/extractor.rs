use std::collections::HashMap;

use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

use crate::model::BladeSizes;

/// Outcome of pulling values out of a finder page.
///
/// `Empty` means the expected markup was there but held nothing useful;
/// `Malformed` means the markup itself did not look the way the site
/// normally renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Found(T),
    Empty,
    Malformed { reason: String },
}

impl<T: Default> Extraction<T> {
    /// Degrades to the empty value, logging anything malformed.
    pub fn into_value(self, context: &str) -> T {
        match self {
            Extraction::Found(value) => value,
            Extraction::Empty => {
                debug!("No data on page for {}", context);
                T::default()
            }
            Extraction::Malformed { reason } => {
                warn!("Unexpected page structure for {}: {}", context, reason);
                T::default()
            }
        }
    }
}

impl<T> Extraction<T> {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Extraction::Malformed { .. })
    }
}

/// Which cascading dropdown an option list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Makes,
    Models,
}

impl OptionKind {
    fn container_css(self) -> &'static str {
        match self {
            OptionKind::Makes => "div.bf_makeOptonsHtml",
            OptionKind::Models => "div.bf_modelOptonsHtml",
        }
    }

    /// Placeholder entry at the top of the dropdown.
    pub fn sentinel(self) -> &'static str {
        match self {
            OptionKind::Makes => "Make",
            OptionKind::Models => "Model",
        }
    }
}

pub struct Extractor {
    make_container: Selector,
    model_container: Selector,
    option: Selector,
    search_header: Selector,
    blade_size: Selector,
    strong: Selector,
    bold: Selector,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            make_container: selector(OptionKind::Makes.container_css()),
            model_container: selector(OptionKind::Models.container_css()),
            option: selector("option"),
            search_header: selector("header.search_header"),
            blade_size: selector("div.blade_size"),
            strong: selector("strong"),
            // older pages rendered the size in <b>
            bold: selector("b"),
        }
    }

    pub fn extract_makes(&self, html: &str) -> Extraction<Vec<String>> {
        self.extract_options(html, OptionKind::Makes)
    }

    pub fn extract_models(&self, html: &str) -> Extraction<Vec<String>> {
        self.extract_options(html, OptionKind::Models)
    }

    /// Collects the `value` of every `<option>` in the first container for
    /// `kind`, in document order, trimmed, minus the sentinel and blanks.
    pub fn extract_options(&self, html: &str, kind: OptionKind) -> Extraction<Vec<String>> {
        let document = Html::parse_document(html);
        let container_selector = match kind {
            OptionKind::Makes => &self.make_container,
            OptionKind::Models => &self.model_container,
        };

        let Some(container) = document.select(container_selector).next() else {
            return Extraction::Malformed {
                reason: format!("no {} container", kind.container_css()),
            };
        };

        let values: Vec<String> = container
            .select(&self.option)
            .filter_map(|option| option.value().attr("value"))
            .map(str::trim)
            .filter(|value| !value.is_empty() && *value != kind.sentinel())
            .map(str::to_string)
            .collect();

        if values.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Found(values)
        }
    }

    /// Reads the driver/passenger/rear sizes from the search header.
    ///
    /// A single unreadable `blade_size` element discards the whole page: the
    /// result is then `Malformed` and degrades to all-empty sizes.
    pub fn extract_blade_sizes(&self, html: &str) -> Extraction<BladeSizes> {
        let document = Html::parse_document(html);

        let Some(header) = document.select(&self.search_header).next() else {
            return Extraction::Malformed {
                reason: "no header.search_header".to_string(),
            };
        };

        let mut labels = HashMap::new();
        for element in header.select(&self.blade_size) {
            match self.read_blade_size(element) {
                Ok((label, size)) => {
                    labels.insert(label, size);
                }
                Err(reason) => return Extraction::Malformed { reason },
            }
        }

        let sizes = BladeSizes::from_labels(&labels);
        if sizes.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Found(sizes)
        }
    }

    fn read_blade_size(&self, element: ElementRef<'_>) -> Result<(String, String), String> {
        let text: String = element.text().collect();
        let label = text
            .split_whitespace()
            .next()
            .ok_or_else(|| "blade_size element without text".to_string())?
            .to_lowercase();

        let size = element
            .select(&self.strong)
            .next()
            .or_else(|| element.select(&self.bold).next())
            .ok_or_else(|| format!("blade_size '{}' without emphasized size", label))?
            .text()
            .collect::<String>()
            .trim()
            .to_string();

        Ok((label, size))
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_makes_skip_sentinel() {
        let html = r#"<div class="bf_makeOptonsHtml"><option value="Make"></option><option value="Toyota"></option></div>"#;
        let extractor = Extractor::new();
        assert_eq!(extractor.extract_makes(html), Extraction::Found(vec!["Toyota".to_string()]));
    }

    #[test]
    fn test_makes_keep_document_order_and_trim() {
        let html = r#"
            <form>
              <div class="bf_makeOptonsHtml">
                <select>
                  <option value="Make">Make</option>
                  <option value=" Chevrolet ">Chevrolet</option>
                  <option value="">--</option>
                  <option>No value</option>
                  <option value="Buick">Buick</option>
                  <option value="Alfa Romeo">Alfa Romeo</option>
                </select>
              </div>
            </form>"#;
        let makes = Extractor::new().extract_makes(html).into_value("test");
        assert_eq!(makes, vec!["Chevrolet", "Buick", "Alfa Romeo"]);
    }

    #[test]
    fn test_missing_container_degrades_to_empty() {
        let html = "<html><body><p>Maintenance</p></body></html>";
        let extractor = Extractor::new();
        let result = extractor.extract_makes(html);
        assert!(result.is_malformed());
        assert!(result.into_value("test").is_empty());
    }

    #[test]
    fn test_models_use_their_own_container() {
        let html = r#"
            <div class="bf_makeOptonsHtml"><option value="Ford"></option></div>
            <div class="bf_modelOptonsHtml">
              <option value="Model"></option>
              <option value="F-150"></option>
              <option value="Mustang"></option>
            </div>"#;
        let extractor = Extractor::new();
        assert_eq!(
            extractor.extract_models(html),
            Extraction::Found(vec!["F-150".to_string(), "Mustang".to_string()])
        );
    }

    #[test]
    fn test_container_with_only_sentinel_is_empty() {
        let html = r#"<div class="bf_modelOptonsHtml"><option value="Model">Model</option></div>"#;
        assert_eq!(Extractor::new().extract_models(html), Extraction::Empty);
    }

    #[test]
    fn test_driver_only_blade_size() {
        let html = r#"<header class="search_header"><div class="blade_size">Driver <strong>22"</strong></div></header>"#;
        let sizes = Extractor::new().extract_blade_sizes(html).into_value("test");
        assert_eq!(
            sizes,
            BladeSizes { driver: "22\"".into(), passenger: String::new(), rear: String::new() }
        );
    }

    #[test]
    fn test_all_positions() {
        let html = r#"
            <header class="search_header">
              <h1>2010 Honda Accord</h1>
              <div class="blade_size">Driver Side <strong> 26" </strong></div>
              <div class="blade_size">PASSENGER <strong>19"</strong></div>
              <div class="blade_size">Rear <b>10"</b></div>
            </header>"#;
        let result = Extractor::new().extract_blade_sizes(html);
        assert_eq!(
            result,
            Extraction::Found(BladeSizes { driver: "26\"".into(), passenger: "19\"".into(), rear: "10\"".into() })
        );
    }

    #[test]
    fn test_strong_wins_over_earlier_bold() {
        let html = r#"
            <header class="search_header">
              <div class="blade_size"><b>Driver</b> side <strong>24"</strong></div>
            </header>"#;
        let sizes = Extractor::new().extract_blade_sizes(html).into_value("test");
        assert_eq!(sizes.driver, "24\"");
    }

    #[test]
    fn test_missing_header_gives_all_empty() {
        let html = r#"<div class="blade_size">Driver <strong>22"</strong></div>"#;
        let result = Extractor::new().extract_blade_sizes(html);
        assert!(result.is_malformed());
        assert_eq!(result.into_value("test"), BladeSizes::default());
    }

    #[test]
    fn test_one_bad_element_discards_page() {
        let html = r#"
            <header class="search_header">
              <div class="blade_size">Driver <strong>22"</strong></div>
              <div class="blade_size">Passenger 18"</div>
            </header>"#;
        let result = Extractor::new().extract_blade_sizes(html);
        assert!(result.is_malformed());
        assert_eq!(result.into_value("test"), BladeSizes::default());
    }

    #[test]
    fn test_blank_element_discards_page() {
        let html = r#"<header class="search_header"><div class="blade_size">  </div></header>"#;
        assert!(Extractor::new().extract_blade_sizes(html).is_malformed());
    }

    #[test]
    fn test_header_without_sizes_is_empty() {
        let html = r#"<header class="search_header"><h1>No results</h1></header>"#;
        assert_eq!(Extractor::new().extract_blade_sizes(html), Extraction::Empty);
    }
}

use std::collections::HashMap;
use std::fmt;

/// One lookup against the blade size finder. An empty `make` or `model`
/// means "unfiltered": the site answers with the list of options instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub year: u16,
    pub make: String,
    pub model: String,
}

impl Query {
    pub fn makes(year: u16) -> Self {
        Query { year, make: String::new(), model: String::new() }
    }

    pub fn models(year: u16, make: &str) -> Self {
        Query { year, make: make.to_string(), model: String::new() }
    }

    pub fn vehicle(year: u16, make: &str, model: &str) -> Self {
        Query { year, make: make.to_string(), model: model.to_string() }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.make, self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BladePosition {
    Driver,
    Passenger,
    Rear,
}

impl BladePosition {
    pub const ALL: [BladePosition; 3] = [BladePosition::Driver, BladePosition::Passenger, BladePosition::Rear];

    pub fn label(self) -> &'static str {
        match self {
            BladePosition::Driver => "driver",
            BladePosition::Passenger => "passenger",
            BladePosition::Rear => "rear",
        }
    }

    /// Matches an already lower-cased label token.
    pub fn from_label(label: &str) -> Option<Self> {
        BladePosition::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Blade sizes for the three wiper positions. A position the page did not
/// report is an empty string, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BladeSizes {
    pub driver: String,
    pub passenger: String,
    pub rear: String,
}

impl BladeSizes {
    /// Builds the sizes from scraped `label -> size` pairs. Labels other than
    /// the three known positions are dropped.
    pub fn from_labels(labels: &HashMap<String, String>) -> Self {
        let mut sizes = BladeSizes::default();
        for position in BladePosition::ALL {
            if let Some(size) = labels.get(position.label()) {
                *sizes.get_mut(position) = size.clone();
            }
        }
        sizes
    }

    pub fn get(&self, position: BladePosition) -> &str {
        match position {
            BladePosition::Driver => &self.driver,
            BladePosition::Passenger => &self.passenger,
            BladePosition::Rear => &self.rear,
        }
    }

    fn get_mut(&mut self, position: BladePosition) -> &mut String {
        match position {
            BladePosition::Driver => &mut self.driver,
            BladePosition::Passenger => &mut self.passenger,
            BladePosition::Rear => &mut self.rear,
        }
    }

    pub fn is_empty(&self) -> bool {
        BladePosition::ALL.iter().all(|p| self.get(*p).is_empty())
    }
}

/// A scraped vehicle row as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BladeSizeRecord {
    pub year: u16,
    pub make: String,
    pub model: String,
    pub blade_sizes: BladeSizes,
}

impl BladeSizeRecord {
    /// Output column order: year, make, model, driver, passenger, rear.
    pub fn fields(&self) -> [String; 6] {
        [
            self.year.to_string(),
            self.make.clone(),
            self.model.clone(),
            self.blade_sizes.driver.clone(),
            self.blade_sizes.passenger.clone(),
            self.blade_sizes.rear.clone(),
        ]
    }
}

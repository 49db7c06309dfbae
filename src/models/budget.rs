use std::fmt::Display;

/// Label clients send when they don't want budget filtering
pub const NO_PREFERENCE: &str = "No preference";

/// A named price bracket used to filter search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetRange {
    Under100,
    From100To300,
    From300To500,
    From500To1000,
    Over1000,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 5] = [
        BudgetRange::Under100,
        BudgetRange::From100To300,
        BudgetRange::From300To500,
        BudgetRange::From500To1000,
        BudgetRange::Over1000,
    ];

    /// Resolves a client-supplied label.
    ///
    /// Returns `None` for "No preference" and for any label we don't know,
    /// both of which mean "don't filter".
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Under100 => "Under $100",
            BudgetRange::From100To300 => "$100 - $300",
            BudgetRange::From300To500 => "$300 - $500",
            BudgetRange::From500To1000 => "$500 - $1000",
            BudgetRange::Over1000 => "Over $1000",
        }
    }

    /// Inclusive `(min, max)` bounds in dollars
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            BudgetRange::Under100 => (0.0, 100.0),
            BudgetRange::From100To300 => (100.0, 300.0),
            BudgetRange::From300To500 => (300.0, 500.0),
            BudgetRange::From500To1000 => (500.0, 1000.0),
            BudgetRange::Over1000 => (1000.0, f64::INFINITY),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        let (min, max) = self.bounds();
        min <= price && price <= max
    }
}

impl Display for BudgetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

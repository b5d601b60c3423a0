use stockroom_core::{DomainError, ProductId};

/// One requested line of an order: which product, how many units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// What happened to a single order line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Purchased { line: OrderLine, total: f64 },
    Failed { line: OrderLine, error: DomainError },
}

impl LineOutcome {
    pub fn line(&self) -> &OrderLine {
        match self {
            LineOutcome::Purchased { line, .. } | LineOutcome::Failed { line, .. } => line,
        }
    }

    pub fn is_purchased(&self) -> bool {
        matches!(self, LineOutcome::Purchased { .. })
    }
}

/// Per-line outcomes of an order, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderReceipt {
    outcomes: Vec<LineOutcome>,
}

impl OrderReceipt {
    pub(crate) fn record(&mut self, outcome: LineOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[LineOutcome] {
        &self.outcomes
    }

    /// Sum of the successful lines only.
    pub fn total(&self) -> f64 {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                LineOutcome::Purchased { total, .. } => Some(*total),
                LineOutcome::Failed { .. } => None,
            })
            .fold(0.0, |acc, total| acc + total)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&OrderLine, &DomainError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            LineOutcome::Failed { line, error } => Some((line, error)),
            LineOutcome::Purchased { .. } => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(LineOutcome::is_purchased)
    }
}

//! Food items that hungry humans eat from.

/// A food item with a number of meals left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Meals remaining; the item is removed at zero.
    pub amount: u32,
}

impl Food {
    /// Creates a food item holding `amount` meals.
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }

    /// Removes one meal.
    pub fn consume(&mut self) {
        self.amount = self.amount.saturating_sub(1);
    }

    /// Whether any meal is left.
    pub fn has_more(&self) -> bool {
        self.amount > 0
    }
}

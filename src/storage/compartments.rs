use std::fmt::{self, Debug, Display};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures reported by [`CompartmentedStorage`]. A failing call never
/// mutates the storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("invalid argument: {reason} (got {value:?})")]
    InvalidArgument { reason: &'static str, value: f32 },
    #[error(
        "no room for another compartment: {needed} x {compartment_capacity:?} exceeds total capacity {total_capacity:?}"
    )]
    CapacityExceeded {
        needed: usize,
        compartment_capacity: f32,
        total_capacity: f32,
    },
}

#[derive(Debug, Clone)]
struct Compartment<C> {
    category: C,
    quantity: f32,
}

/// Fixed-capacity storage split on demand into equal compartments, one per
/// category.
///
/// Compartments are kept in the order they were opened, which is also the
/// order [`describe`](Self::describe) reports them in.
#[derive(Debug, Clone)]
pub struct CompartmentedStorage<C> {
    compartment_capacity: f32,
    total_capacity: f32,
    compartments: Vec<Compartment<C>>,
}

impl<C> CompartmentedStorage<C> {
    pub fn new(compartment_capacity: f32, total_capacity: f32) -> Result<Self, StorageError> {
        if !(compartment_capacity >= 0.0) {
            warn!(compartment_capacity, "rejected compartment capacity");
            return Err(StorageError::InvalidArgument {
                reason: "compartment capacity cannot be negative",
                value: compartment_capacity,
            });
        }
        if !(total_capacity >= compartment_capacity) {
            warn!(total_capacity, compartment_capacity, "rejected total capacity");
            return Err(StorageError::InvalidArgument {
                reason: "total capacity cannot be less than compartment capacity",
                value: total_capacity,
            });
        }
        Ok(Self {
            compartment_capacity,
            total_capacity,
            compartments: Vec::new(),
        })
    }

    pub fn compartment_capacity(&self) -> f32 {
        self.compartment_capacity
    }

    pub fn total_capacity(&self) -> f32 {
        self.total_capacity
    }

    pub fn open_compartments(&self) -> usize {
        self.compartments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compartments.is_empty()
    }

    /// Whether one more compartment fits inside the total capacity.
    pub fn can_open_compartment(&self) -> bool {
        (self.compartments.len() + 1) as f32 * self.compartment_capacity <= self.total_capacity
    }

    pub fn total_stored(&self) -> f32 {
        self.compartments.iter().map(|c| c.quantity).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, f32)> {
        self.compartments.iter().map(|c| (&c.category, c.quantity))
    }
}

impl<C: PartialEq> CompartmentedStorage<C> {
    pub fn contains(&self, category: &C) -> bool {
        self.find(category).is_some()
    }

    pub fn amount_of(&self, category: &C) -> f32 {
        self.find(category).map_or(0.0, |c| c.quantity)
    }

    /// Room left in the compartment of `category`; zero when no such
    /// compartment is open.
    pub fn free_space_of(&self, category: &C) -> f32 {
        self.find(category)
            .map_or(0.0, |c| self.compartment_capacity - c.quantity)
    }

    fn position(&self, category: &C) -> Option<usize> {
        self.compartments
            .iter()
            .position(|c| &c.category == category)
    }

    fn find(&self, category: &C) -> Option<&Compartment<C>> {
        self.compartments.iter().find(|c| &c.category == category)
    }

    fn find_mut(&mut self, category: &C) -> Option<&mut Compartment<C>> {
        self.compartments
            .iter_mut()
            .find(|c| &c.category == category)
    }
}

// Mutating operations log the category with `Debug`.
impl<C: PartialEq + Debug> CompartmentedStorage<C> {
    /// Stores `amount` of `category` and returns the part that did not fit.
    ///
    /// Opens a compartment the first time a category is seen; that is the
    /// only case that can fail with [`StorageError::CapacityExceeded`].
    pub fn add(&mut self, category: C, amount: f32) -> Result<f32, StorageError> {
        check_amount(amount)?;
        let capacity = self.compartment_capacity;

        if let Some(compartment) = self.find_mut(&category) {
            let sum = compartment.quantity + amount;
            if sum > capacity {
                compartment.quantity = capacity;
                debug!(category = ?category, overflow = sum - capacity, "compartment filled");
                return Ok(sum - capacity);
            }
            compartment.quantity = sum;
            debug!(category = ?category, quantity = sum, "added to compartment");
            return Ok(0.0);
        }

        if !self.can_open_compartment() {
            let needed = self.compartments.len() + 1;
            warn!(category = ?category, needed, "refusing to open compartment");
            return Err(StorageError::CapacityExceeded {
                needed,
                compartment_capacity: capacity,
                total_capacity: self.total_capacity,
            });
        }

        let stored = amount.min(capacity);
        info!(category = ?category, quantity = stored, "opened compartment");
        self.compartments.push(Compartment {
            category,
            quantity: stored,
        });
        Ok((amount - capacity).max(0.0))
    }

    /// Takes up to `amount` of `category` and returns what was actually
    /// taken. The compartment stays open even when it drains to zero.
    pub fn withdraw(&mut self, category: &C, amount: f32) -> Result<f32, StorageError> {
        check_amount(amount)?;
        let Some(compartment) = self.find_mut(category) else {
            return Ok(0.0);
        };

        let remaining = compartment.quantity - amount;
        if remaining >= 0.0 {
            compartment.quantity = remaining;
            debug!(category = ?category, withdrawn = amount, remaining, "withdrew from compartment");
            Ok(amount)
        } else {
            let available = compartment.quantity;
            compartment.quantity = 0.0;
            debug!(category = ?category, withdrawn = available, requested = amount, "compartment drained");
            Ok(available)
        }
    }

    /// Closes the compartment of `category` if it is open and empty.
    ///
    /// Returns `false` both for a non-empty compartment and for a category
    /// that was never opened.
    pub fn remove_compartment(&mut self, category: &C) -> bool {
        match self.position(category) {
            Some(index) if self.compartments[index].quantity == 0.0 => {
                self.compartments.remove(index);
                debug!(category = ?category, "removed compartment");
                true
            }
            _ => false,
        }
    }
}

impl<C: Display> CompartmentedStorage<C> {
    /// Multi-line capacity report, one line per open compartment.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

// Quantities use `{:?}` so integral values keep their `.0`.
impl<C: Display> Display for CompartmentedStorage<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total capacity={:?},", self.total_capacity)?;
        writeln!(f, "Compartment capacity={:?},", self.compartment_capacity)?;
        for compartment in &self.compartments {
            writeln!(
                f,
                "Category - {}, Quantity - {:?}",
                compartment.category, compartment.quantity
            )?;
        }
        Ok(())
    }
}

fn check_amount(amount: f32) -> Result<(), StorageError> {
    if amount >= 0.0 {
        Ok(())
    } else {
        warn!(amount, "rejected quantity");
        Err(StorageError::InvalidArgument {
            reason: "quantity must be a non-negative number",
            value: amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> CompartmentedStorage<&'static str> {
        CompartmentedStorage::new(10.0, 20.0).unwrap()
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn new_rejects_negative_compartment_capacity() {
        let err = CompartmentedStorage::<&str>::new(-1.0, 10.0).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument { .. }));
    }

    #[test]
    fn new_rejects_total_below_compartment_capacity() {
        let err = CompartmentedStorage::<&str>::new(5.0, 2.0).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument { .. }));
    }

    #[test]
    fn new_rejects_nan_capacities() {
        assert!(CompartmentedStorage::<&str>::new(f32::NAN, 10.0).is_err());
        assert!(CompartmentedStorage::<&str>::new(1.0, f32::NAN).is_err());
    }

    #[test]
    fn new_accepts_zero_capacities() {
        let storage = CompartmentedStorage::<&str>::new(0.0, 0.0).unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.compartment_capacity(), 0.0);
        assert_eq!(storage.total_capacity(), 0.0);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut storage = storage();
        assert!(matches!(
            storage.add("buckwheat", -1.0),
            Err(StorageError::InvalidArgument { .. })
        ));
        assert!(matches!(
            storage.withdraw(&"peas", -1.0),
            Err(StorageError::InvalidArgument { .. })
        ));
        assert!(storage.is_empty());
    }

    #[test]
    fn nan_amounts_are_rejected() {
        let mut storage = storage();
        storage.add("rice", 4.0).unwrap();
        let before = storage.describe();

        for result in [
            storage.add("rice", f32::NAN),
            storage.add("oats", f32::NAN),
            storage.withdraw(&"rice", f32::NAN),
        ] {
            match result {
                Err(StorageError::InvalidArgument { reason, value }) => {
                    assert_eq!(reason, "quantity must be a non-negative number");
                    assert!(value.is_nan());
                }
                other => panic!("expected InvalidArgument, got {other:?}"),
            }
        }

        assert_eq!(storage.describe(), before);
        assert!(!storage.contains(&"oats"));
        assert_eq!(storage.amount_of(&"rice"), 4.0);
    }

    #[test]
    fn construction_and_queries_need_no_debug_category() {
        #[derive(PartialEq)]
        struct Bin(u8);

        let storage = CompartmentedStorage::<Bin>::new(5.0, 10.0).unwrap();
        assert!(storage.can_open_compartment());
        assert!(!storage.contains(&Bin(1)));
        assert_eq!(storage.amount_of(&Bin(1)), 0.0);
        assert_eq!(storage.free_space_of(&Bin(1)), 0.0);
        assert_eq!(storage.total_stored(), 0.0);
    }

    #[test]
    fn add_refuses_compartment_beyond_total_capacity() {
        let mut storage = storage();
        storage.add("buckwheat", 10.0).unwrap();
        storage.add("bulgur", 5.0).unwrap();

        let err = storage.add("peas", 5.0).unwrap_err();
        assert_eq!(
            err,
            StorageError::CapacityExceeded {
                needed: 3,
                compartment_capacity: 10.0,
                total_capacity: 20.0,
            }
        );
        assert_eq!(storage.open_compartments(), 2);
        assert!(!storage.contains(&"peas"));
    }

    #[test]
    fn add_to_open_compartment_ignores_total_capacity() {
        let mut storage = storage();
        storage.add("buckwheat", 1.0).unwrap();
        storage.add("bulgur", 1.0).unwrap();

        assert_close(storage.add("bulgur", 4.0).unwrap(), 0.0);
        assert_close(storage.amount_of(&"bulgur"), 5.0);
    }

    #[test]
    fn add_returns_overflow_for_new_compartment() {
        let mut storage = storage();
        assert_close(storage.add("buckwheat", 30.0).unwrap(), 20.0);
        assert_close(storage.amount_of(&"buckwheat"), 10.0);
    }

    #[test]
    fn add_returns_overflow_for_existing_compartment() {
        let mut storage = storage();
        assert_close(storage.add("buckwheat", 6.0).unwrap(), 0.0);
        assert_close(storage.add("buckwheat", 10.0).unwrap(), 6.0);
        assert_close(storage.amount_of(&"buckwheat"), 10.0);
    }

    #[test]
    fn add_zero_opens_an_empty_compartment() {
        let mut storage = storage();
        assert_eq!(storage.add("millet", 0.0).unwrap(), 0.0);
        assert!(storage.contains(&"millet"));
        assert_eq!(storage.amount_of(&"millet"), 0.0);
    }

    #[test]
    fn withdraw_partial_amount() {
        let mut storage = storage();
        storage.add("bulgur", 10.0).unwrap();
        assert_close(storage.withdraw(&"bulgur", 5.0).unwrap(), 5.0);
        assert_close(storage.amount_of(&"bulgur"), 5.0);
    }

    #[test]
    fn withdraw_more_than_available_returns_what_was_stored() {
        let mut storage = storage();
        storage.add("millet", 5.0).unwrap();
        assert_close(storage.withdraw(&"millet", 15.0).unwrap(), 5.0);
        assert_eq!(storage.amount_of(&"millet"), 0.0);
        assert!(storage.contains(&"millet"));
    }

    #[test]
    fn withdraw_exact_amount() {
        let mut storage = storage();
        storage.add("millet", 5.0).unwrap();
        assert_eq!(storage.withdraw(&"millet", 5.0).unwrap(), 5.0);
        assert_eq!(storage.amount_of(&"millet"), 0.0);
    }

    #[test]
    fn withdraw_from_absent_category_creates_nothing() {
        let mut storage = storage();
        assert_eq!(storage.withdraw(&"rice", 5.0).unwrap(), 0.0);
        assert!(!storage.contains(&"rice"));
        assert_eq!(storage.open_compartments(), 0);
    }

    #[test]
    fn remove_compartment_only_when_empty() {
        let mut storage = storage();
        storage.add("millet", 5.0).unwrap();
        storage.withdraw(&"millet", 6.0).unwrap();

        assert!(storage.remove_compartment(&"millet"));
        assert!(!storage.contains(&"millet"));
        assert_eq!(storage.amount_of(&"millet"), 0.0);
    }

    #[test]
    fn remove_compartment_keeps_non_empty() {
        let mut storage = storage();
        storage.add("peas", 2.0).unwrap();
        assert!(!storage.remove_compartment(&"peas"));
        assert_close(storage.amount_of(&"peas"), 2.0);
    }

    #[test]
    fn remove_compartment_of_absent_category_is_false() {
        let mut storage = storage();
        assert!(!storage.remove_compartment(&"peas"));
    }

    #[test]
    fn removing_frees_room_for_a_new_compartment() {
        let mut storage = storage();
        storage.add("buckwheat", 0.0).unwrap();
        storage.add("bulgur", 3.0).unwrap();
        assert!(!storage.can_open_compartment());

        assert!(storage.remove_compartment(&"buckwheat"));
        assert!(storage.can_open_compartment());
        storage.add("peas", 1.0).unwrap();
        assert_eq!(storage.open_compartments(), 2);
    }

    #[test]
    fn free_space_of_open_compartment() {
        let mut storage = storage();
        storage.add("buckwheat", 2.0).unwrap();
        assert_close(storage.free_space_of(&"buckwheat"), 8.0);
    }

    #[test]
    fn free_space_of_absent_category_is_zero() {
        let storage = storage();
        assert_eq!(storage.free_space_of(&"buckwheat"), 0.0);
        assert_eq!(storage.amount_of(&"buckwheat"), 0.0);
    }

    #[test]
    fn queries_are_stable() {
        let mut storage = storage();
        storage.add("oats", 3.5).unwrap();
        let amounts: Vec<f32> = (0..3).map(|_| storage.amount_of(&"oats")).collect();
        let spaces: Vec<f32> = (0..3).map(|_| storage.free_space_of(&"oats")).collect();
        assert_eq!(amounts, vec![3.5; 3]);
        assert_eq!(spaces, vec![6.5; 3]);
    }

    #[test]
    fn zero_compartment_capacity_opens_unbounded_empty_compartments() {
        let mut storage = CompartmentedStorage::new(0.0, 0.0).unwrap();
        assert_eq!(storage.add("a", 4.0).unwrap(), 4.0);
        assert_eq!(storage.add("b", 1.0).unwrap(), 1.0);
        assert_eq!(storage.open_compartments(), 2);
        assert_eq!(storage.total_stored(), 0.0);
    }

    #[test]
    fn describe_lists_compartments_in_opening_order() {
        let mut storage = storage();
        storage.add("Buckwheat", 10.0).unwrap();
        storage.add("Peas", 1.0).unwrap();

        assert_eq!(
            storage.describe(),
            "Total capacity=20.0,\n\
             Compartment capacity=10.0,\n\
             Category - Buckwheat, Quantity - 10.0\n\
             Category - Peas, Quantity - 1.0\n"
        );
    }

    #[test]
    fn describe_empty_storage() {
        let storage = CompartmentedStorage::<&str>::new(2.5, 5.0).unwrap();
        assert_eq!(
            storage.describe(),
            "Total capacity=5.0,\nCompartment capacity=2.5,\n"
        );
    }
}

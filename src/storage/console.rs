use super::cereal::Cereal;
use super::compartments::{CompartmentedStorage, StorageError};
use super::deliveries::{self, Delivery};
use crate::config::ConsoleConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::info;

const MAX_MESSAGES: usize = 8;

/// Operator-facing wrapper around a cereal storage: applies operator
/// commands and timed deliveries, and keeps a short event log.
pub struct Console {
    storage: CompartmentedStorage<Cereal>,
    delivery_interval: Duration,
    delivery_min: f32,
    delivery_max: f32,
    delivery_timer: Duration,
    delivery_counter: u64,
    rng: StdRng,
    messages: VecDeque<String>,
}

impl Console {
    pub fn new(config: &ConsoleConfig) -> Result<Self, StorageError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &ConsoleConfig, rng: StdRng) -> Result<Self, StorageError> {
        let storage = CompartmentedStorage::new(config.compartment_capacity, config.total_capacity)?;
        Ok(Self {
            storage,
            delivery_interval: config.delivery_interval(),
            delivery_min: config.delivery_min,
            delivery_max: config.delivery_max,
            delivery_timer: Duration::default(),
            delivery_counter: 0,
            rng,
            messages: VecDeque::with_capacity(MAX_MESSAGES),
        })
    }

    pub fn storage(&self) -> &CompartmentedStorage<Cereal> {
        &self.storage
    }

    pub fn messages(&self) -> impl Iterator<Item = &String> {
        self.messages.iter()
    }

    pub fn deliveries_received(&self) -> u64 {
        self.delivery_counter
    }

    /// Fraction of the current delivery interval that has elapsed.
    pub fn delivery_progress(&self) -> f64 {
        if self.delivery_interval.is_zero() {
            return 0.0;
        }
        self.delivery_timer.as_secs_f64() / self.delivery_interval.as_secs_f64()
    }

    pub fn report(&self) -> String {
        self.storage.describe()
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.push_message(message.into());
    }

    pub fn add(&mut self, cereal: Cereal, amount: f32) -> Result<f32, StorageError> {
        match self.storage.add(cereal, amount) {
            Ok(overflow) => {
                let accepted = amount - overflow;
                if overflow > 0.0 {
                    self.push_message(format!(
                        "Stored {accepted:.1} {cereal}; {overflow:.1} did not fit."
                    ));
                } else {
                    self.push_message(format!("Stored {accepted:.1} {cereal}."));
                }
                Ok(overflow)
            }
            Err(err) => {
                self.push_message(format!("Cannot store {cereal}: {err}"));
                Err(err)
            }
        }
    }

    pub fn withdraw(&mut self, cereal: Cereal, amount: f32) -> Result<f32, StorageError> {
        match self.storage.withdraw(&cereal, amount) {
            Ok(taken) => {
                if !self.storage.contains(&cereal) {
                    self.push_message(format!("No {cereal} compartment to withdraw from."));
                } else if taken < amount {
                    self.push_message(format!(
                        "Withdrew {taken:.1} {cereal}; only that much was stored."
                    ));
                } else {
                    self.push_message(format!("Withdrew {taken:.1} {cereal}."));
                }
                Ok(taken)
            }
            Err(err) => {
                self.push_message(format!("Cannot withdraw {cereal}: {err}"));
                Err(err)
            }
        }
    }

    pub fn remove(&mut self, cereal: Cereal) -> bool {
        let removed = self.storage.remove_compartment(&cereal);
        if removed {
            self.push_message(format!("Closed the {cereal} compartment."));
        } else if self.storage.contains(&cereal) {
            self.push_message(format!("The {cereal} compartment is not empty."));
        } else {
            self.push_message(format!("No {cereal} compartment is open."));
        }
        removed
    }

    /// Advances the delivery clock, applying one delivery per elapsed
    /// interval.
    pub fn update(&mut self, delta: Duration) {
        if self.delivery_interval.is_zero() {
            return;
        }
        self.delivery_timer += delta;
        while self.delivery_timer >= self.delivery_interval {
            self.delivery_timer -= self.delivery_interval;
            let delivery = self.next_delivery();
            self.receive(delivery);
        }
    }

    fn next_delivery(&mut self) -> Delivery {
        self.delivery_counter += 1;
        deliveries::generate_delivery(
            self.delivery_counter,
            self.delivery_min,
            self.delivery_max,
            &mut self.rng,
        )
    }

    fn receive(&mut self, delivery: Delivery) {
        info!(id = delivery.id, cereal = %delivery.cereal, amount = delivery.amount, "delivery arrived");
        let Delivery { id, cereal, amount } = delivery;
        let message = match self.storage.add(cereal, amount) {
            Ok(overflow) if overflow > 0.0 => format!(
                "Delivery #{id}: {amount:.1} {cereal}, {overflow:.1} sent back."
            ),
            Ok(_) => format!("Delivery #{id}: {amount:.1} {cereal} stored."),
            Err(err) => format!("Delivery #{id} of {cereal} refused: {err}"),
        };
        self.push_message(message);
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}

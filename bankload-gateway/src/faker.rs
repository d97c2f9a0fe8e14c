//! Fake data for request fixtures
use crate::schema::operations::OperationStatus;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Boris", "Clara", "Dmitry", "Elena", "Fedor", "Galina", "Ivan", "Katya", "Leonid",
    "Maria", "Nikita", "Olga", "Pavel", "Sofia", "Timur",
];

const LAST_NAMES: &[&str] = &[
    "Ivanov", "Smirnova", "Kuznetsov", "Popova", "Volkov", "Sokolova", "Lebedev", "Kozlova",
    "Novikov", "Morozova", "Petrov", "Orlova",
];

const MIDDLE_NAMES: &[&str] = &[
    "Andreevich", "Borisovna", "Viktorovich", "Sergeevna", "Olegovich", "Ivanovna", "Pavlovich",
    "Mikhailovna",
];

const CATEGORIES: &[&str] = &[
    "gas", "taxi", "tolls", "water", "food", "beauty", "medicine", "education", "electricity",
    "fuel", "internet", "phone", "rent", "car", "hobby",
];

/// Source of the fixture values requests are filled with.
pub trait Faker: Send {
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    fn middle_name(&mut self) -> String;
    fn email(&mut self) -> String;
    fn phone_number(&mut self) -> String;
    /// Operation amount, two decimal places.
    fn amount(&mut self) -> f64;
    fn category(&mut self) -> String;
    fn operation_status(&mut self) -> OperationStatus;
}

#[derive(Clone, Debug)]
pub struct RandomFaker {
    rng: SmallRng,
}

impl RandomFaker {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, values: &[&str]) -> String {
        values
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for RandomFaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Faker for RandomFaker {
    fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES)
    }

    fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES)
    }

    fn middle_name(&mut self) -> String {
        self.pick(MIDDLE_NAMES)
    }

    fn email(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        let suffix: u32 = self.rng.gen();
        format!("{first}.{last}.{suffix}@example.com")
    }

    fn phone_number(&mut self) -> String {
        let number: u64 = self.rng.gen_range(0..10_000_000_000);
        format!("+7{number:010}")
    }

    fn amount(&mut self) -> f64 {
        let cents: u64 = self.rng.gen_range(100..=10_000);
        cents as f64 / 100.
    }

    fn category(&mut self) -> String {
        self.pick(CATEGORIES)
    }

    fn operation_status(&mut self) -> OperationStatus {
        *OperationStatus::ALL
            .choose(&mut self.rng)
            .unwrap_or(&OperationStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fakers_repeat() {
        let mut a = RandomFaker::seeded(3);
        let mut b = RandomFaker::seeded(3);
        assert_eq!(a.email(), b.email());
        assert_eq!(a.amount(), b.amount());
    }

    #[test]
    fn values_are_well_formed() {
        let mut faker = RandomFaker::seeded(11);
        for _ in 0..100 {
            let email = faker.email();
            assert!(email.ends_with("@example.com") && email.contains('.'));
            let phone = faker.phone_number();
            assert_eq!(phone.len(), 12);
            let amount = faker.amount();
            assert!((1.0..=100.0).contains(&amount));
            assert!(CATEGORIES.contains(&faker.category().as_str()));
        }
    }
}

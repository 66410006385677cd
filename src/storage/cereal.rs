use std::fmt;

/// Commodity categories handled by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cereal {
    Buckwheat,
    Bulgur,
    Millet,
    Peas,
    Rice,
    Oats,
}

impl Cereal {
    pub const ALL: [Cereal; 6] = [
        Cereal::Buckwheat,
        Cereal::Bulgur,
        Cereal::Millet,
        Cereal::Peas,
        Cereal::Rice,
        Cereal::Oats,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cereal::Buckwheat => "Buckwheat",
            Cereal::Bulgur => "Bulgur",
            Cereal::Millet => "Millet",
            Cereal::Peas => "Peas",
            Cereal::Rice => "Rice",
            Cereal::Oats => "Oats",
        }
    }
}

impl fmt::Display for Cereal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

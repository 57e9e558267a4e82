use serde::{Deserialize, Serialize};

/// The fixed set of categories a transaction can be filed under.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Category {
    Salary,
    Food,
    Transport,
    Entertainment,
    Rent,
    Utilities,
    /// Offered as the default when entering a new transaction.
    #[default]
    Shopping,
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

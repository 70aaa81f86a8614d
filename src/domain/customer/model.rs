//! Customer domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// A hotel guest on record
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique per customer
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

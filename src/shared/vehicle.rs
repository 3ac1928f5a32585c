//! Vehicle entities for driver accounts.

use serde::{Deserialize, Serialize};

/// A registered vehicle, as returned by `/vehiclesdata/{userId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: String,
    /// Model, e.g. "Toyota Camry"
    pub modelo: String,
    /// Color
    pub cor: String,
    /// License plate
    pub placa: String,
    /// Whether this is the vehicle currently in service
    #[serde(default)]
    pub active: bool,
}

impl Vehicle {
    /// One-line label used in pickers and driver cards.
    pub fn label(&self) -> String {
        format!("{} {} · {}", self.cor, self.modelo, self.placa)
    }
}

/// Payload for `/add-vehicle`
#[derive(Debug, Clone, Serialize)]
pub struct NewVehicle {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub modelo: String,
    pub cor: String,
    pub placa: String,
}

impl NewVehicle {
    /// Validate before submission; all three fields are required.
    pub fn validate(&self) -> Result<(), crate::shared::error::ApiError> {
        use crate::shared::error::ApiError;
        if self.modelo.trim().is_empty() {
            return Err(ApiError::validation("modelo", "Model is required"));
        }
        if self.cor.trim().is_empty() {
            return Err(ApiError::validation("cor", "Color is required"));
        }
        if self.placa.trim().is_empty() {
            return Err(ApiError::validation("placa", "Plate is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_label() {
        let v = Vehicle {
            id: "v1".to_string(),
            modelo: "Toyota Camry".to_string(),
            cor: "Fuchsia".to_string(),
            placa: "KW690YF".to_string(),
            active: true,
        };
        assert_eq!(v.label(), "Fuchsia Toyota Camry · KW690YF");
    }

    #[test]
    fn test_new_vehicle_requires_plate() {
        let v = NewVehicle {
            user_id: "u1".to_string(),
            modelo: "Civic".to_string(),
            cor: "Blue".to_string(),
            placa: "  ".to_string(),
        };
        assert!(v.validate().is_err());
    }
}

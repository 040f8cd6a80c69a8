use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::payment::calculate_deposit;
use crate::errors::BookingError;

/// The shop's service catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOffering {
    SimpleCut,
    CutAndEyebrows,
    CutAndBeard,
    CutAndStyling,
    FullCut,
}

impl ServiceOffering {
    pub const ALL: [ServiceOffering; 5] = [
        ServiceOffering::SimpleCut,
        ServiceOffering::CutAndEyebrows,
        ServiceOffering::CutAndBeard,
        ServiceOffering::CutAndStyling,
        ServiceOffering::FullCut,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ServiceOffering::SimpleCut => "Corte sencillo",
            ServiceOffering::CutAndEyebrows => "Corte + cejas",
            ServiceOffering::CutAndBeard => "Corte + barba",
            ServiceOffering::CutAndStyling => "Corte + peinado",
            ServiceOffering::FullCut => "Corte completo",
        }
    }

    /// Price in Colombian pesos.
    pub fn price(&self) -> i64 {
        match self {
            ServiceOffering::SimpleCut => 18_000,
            ServiceOffering::CutAndEyebrows => 20_000,
            ServiceOffering::CutAndBeard | ServiceOffering::CutAndStyling => 25_000,
            ServiceOffering::FullCut => 28_000,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            ServiceOffering::SimpleCut => 35,
            ServiceOffering::CutAndEyebrows | ServiceOffering::CutAndStyling => 45,
            ServiceOffering::CutAndBeard => 50,
            ServiceOffering::FullCut => 60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceOffering::SimpleCut => "simple_cut",
            ServiceOffering::CutAndEyebrows => "cut_and_eyebrows",
            ServiceOffering::CutAndBeard => "cut_and_beard",
            ServiceOffering::CutAndStyling => "cut_and_styling",
            ServiceOffering::FullCut => "full_cut",
        }
    }
}

impl fmt::Display for ServiceOffering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceOffering {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceOffering::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| BookingError::Validation(format!("Unknown service: {}", s)))
    }
}

/// Catalog entry as exposed to the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub key: ServiceOffering,
    pub name: String,
    pub price: i64,
    pub deposit: i64,
    pub duration_minutes: u32,
}

impl From<ServiceOffering> for ServiceInfo {
    fn from(service: ServiceOffering) -> Self {
        Self {
            key: service,
            name: service.name().to_string(),
            price: service.price(),
            deposit: calculate_deposit(service.price()),
            duration_minutes: service.duration_minutes(),
        }
    }
}

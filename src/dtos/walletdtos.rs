use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct DepositDto {
    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponseDto {
    pub status: String,
    pub balance: f64,
}

pub mod db;
pub mod gigdb;
pub mod notificationdb;
pub mod reviewdb;
pub mod userdb;
pub mod walletdb;

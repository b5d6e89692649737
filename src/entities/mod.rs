pub mod inverter_battery;
pub mod otp;
pub mod sale;
pub mod sale_item;
pub mod spare_part;

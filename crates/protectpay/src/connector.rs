pub mod protectpay;

pub mod p900_earnings_register;

pub mod payvision;

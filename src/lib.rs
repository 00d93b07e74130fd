pub mod rbgraph;
pub mod hasse;
pub mod builder;
pub mod cust_error;

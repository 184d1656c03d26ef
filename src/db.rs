pub mod customer_repo;
pub use customer_repo::CustomerRepository;

//! Service layer providing the blog's business operations on top of models.
//! - Separates business logic from data access behind the `PostRepository` port.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides one error taxonomy that maps onto the response envelope.

pub mod errors;
pub mod pagination;
pub mod posts;
#[cfg(test)]
pub mod test_support;

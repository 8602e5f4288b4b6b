pub mod error;
pub mod user;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use user::{
    CreateUserDto, GetUsersDto, StatusAction, UpdateUserDto, User, UserFilter,
    UserRepositoryInterface, UserRole, UserStatus,
};

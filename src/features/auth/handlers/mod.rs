pub mod auth_handler;

pub use auth_handler::{
    __path_get_me, __path_obtain_token, __path_refresh_token, __path_register, get_me,
    obtain_token, refresh_token, register,
};

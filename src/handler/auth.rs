pub mod sign_in;
pub use sign_in as SignIn;

pub mod session;
pub use session as Session;

pub mod sign_out;
pub use sign_out as SignOut;

pub mod myself;
pub use myself as Myself;

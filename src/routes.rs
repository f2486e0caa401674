pub mod app;
pub use app as App;

pub mod settings;
pub use settings as Settings;

pub mod ads;
pub use ads as Ads;

pub mod auth;
pub use auth as Auth;

pub mod media;
pub use media as Media;

pub mod generate;
pub use generate as Generate;

pub mod web_socket;
pub use web_socket as WebSocket;

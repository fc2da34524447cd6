pub mod channel_attribution;
pub mod pageview;

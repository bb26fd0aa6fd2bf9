mod helpers;
mod instance;
mod port;

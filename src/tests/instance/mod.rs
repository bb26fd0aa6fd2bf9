mod handle;
mod launch;

pub mod admin_server;

//! Demo accounts loaded at startup.

/// A demo account before its password is hashed.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

/// Accounts every fresh process starts with.
pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        name: "John Doe",
        email: "john@example.com",
        password: "password123",
    },
    DemoAccount {
        name: "Jane Smith",
        email: "jane@example.com",
        password: "password123",
    },
];

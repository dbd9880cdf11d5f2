// Endpoints reachable without the tenant headers. Each one resolves the
// verification code itself and maps resolver failures to its own wire
// messages, which predate the shared middleware and differ per endpoint.
pub mod auth;
pub mod clientes;
pub mod contasapagar;
pub mod status;

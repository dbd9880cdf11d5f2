// Tenant-scoped endpoints. All of these run behind validar_cliente_middleware
// and read the tenant pool from the request extensions.
pub mod dashboard;
pub mod graficos;
pub mod lancamentos;
pub mod membros;
pub mod relatorio;
pub mod usuarios;

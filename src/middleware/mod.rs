pub mod validar_cliente;

pub use validar_cliente::{validar_cliente_middleware, TenantPool};

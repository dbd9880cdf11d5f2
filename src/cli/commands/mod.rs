pub mod cliente;
pub mod init;
pub mod membro;
pub mod ping;
pub mod usuario;

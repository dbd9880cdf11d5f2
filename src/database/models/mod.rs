pub mod cliente;
pub mod conta_a_pagar;
pub mod membro;
pub mod transacao;
pub mod usuario;

pub use cliente::Cliente;
pub use conta_a_pagar::{classificar, ContaAPagar, StatusConta};
pub use membro::{Membro, MembroResumo};
pub use transacao::{CategoriaTransacao, FormaPagamento, TipoTransacao};
pub use usuario::Usuario;

pub mod contas;
pub mod lancamentos;
pub mod relatorios;
pub mod resolver;

pub use contas::{ContaClassificada, ContasError};
pub use lancamentos::{LancamentoError, LancamentoPayload, SaidaFinanceiraPayload};
pub use relatorios::{RelatorioError, RelatorioPayload, SerieDiaria};
pub use resolver::{ClienteResolvido, ResolveError};

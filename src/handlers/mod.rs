// Two tiers: public endpoints carry their own credential checks inline,
// tenant endpoints sit behind the validar_cliente middleware and receive
// the tenant pool as an extension.
pub mod protected;
pub mod public;

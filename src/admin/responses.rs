use serde::Serialize;

use crate::protocol::{AsesoriaItem, PerfilItem};

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
}

#[derive(Default, Serialize)]
pub struct BuscarUsuariosResponse {
    pub success: bool,
    pub err: String,
    pub usuarios: Vec<PerfilItem>,
}

#[derive(Default, Serialize)]
pub struct VerUsuarioResponse {
    pub success: bool,
    pub err: String,
    pub usuario: PerfilItem,
}

#[derive(Default, Serialize)]
pub struct AsesoriasResponse {
    pub success: bool,
    pub err: String,
    pub asesorias: Vec<AsesoriaItem>,
}

crate::impl_err_response! {
    LoginResponse,
    BuscarUsuariosResponse,
    VerUsuarioResponse,
    AsesoriasResponse,
}

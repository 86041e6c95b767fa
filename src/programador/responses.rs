use serde::Serialize;

use crate::protocol::{AsesoriaItem, PerfilItem, ProyectoItem};

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
}

#[derive(Default, Serialize)]
pub struct PerfilResponse {
    pub success: bool,
    pub err: String,
    pub perfil: PerfilItem,
}

#[derive(Default, Serialize)]
pub struct AsesoriasResponse {
    pub success: bool,
    pub err: String,
    pub asesorias: Vec<AsesoriaItem>,
}

#[derive(Default, Serialize)]
pub struct ProyectosResponse {
    pub success: bool,
    pub err: String,
    pub proyectos: Vec<ProyectoItem>,
}

crate::impl_err_response! {
    LoginResponse,
    PerfilResponse,
    AsesoriasResponse,
    ProyectosResponse,
}

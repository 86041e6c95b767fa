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
#[serde(rename_all = "camelCase")]
pub struct ProgramadorItem {
    pub uid: String,
    pub nombre: String,
    pub email: String,
    pub foto_perfil: String,
    pub especialidad: String,
    pub descripcion: String,
    pub tecnologias: Vec<String>,
}

#[derive(Default, Serialize)]
pub struct BuscarProgramadoresResponse {
    pub success: bool,
    pub err: String,
    pub programadores: Vec<ProgramadorItem>,
}

#[derive(Default, Serialize)]
pub struct VerProgramadorResponse {
    pub success: bool,
    pub err: String,
    pub programador: PerfilItem,
}

#[derive(Default, Serialize)]
pub struct VerProyectosResponse {
    pub success: bool,
    pub err: String,
    pub proyectos: Vec<ProyectoItem>,
}

#[derive(Default, Serialize)]
pub struct AsesoriasResponse {
    pub success: bool,
    pub err: String,
    pub asesorias: Vec<AsesoriaItem>,
}

crate::impl_err_response! {
    LoginResponse,
    PerfilResponse,
    BuscarProgramadoresResponse,
    VerProgramadorResponse,
    VerProyectosResponse,
    AsesoriasResponse,
}

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub uid: String,
    pub email: String,
    pub nombre: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub uid: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPerfilRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificarPerfilRequest {
    pub login_token: String,
    pub nombre: Option<String>,
    pub foto_perfil: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuscarProgramadoresRequest {
    pub nombre: Option<String>,
    pub especialidad: Option<String>,
    pub tecnologia: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerProgramadorRequest {
    pub id_programador: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerProyectosRequest {
    pub id_programador: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolicitarAsesoriaRequest {
    pub login_token: String,
    pub id_programador: String,
    pub fecha_asesoria: String,
    pub hora_asesoria: String,
    #[serde(default)]
    pub motivo: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelarAsesoriaRequest {
    pub login_token: String,
    pub id: String,
    #[serde(default)]
    pub motivo_cancelacion: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MisAsesoriasRequest {
    pub login_token: String,
    pub estado: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

use crate::schema::proyectos;

#[derive(Queryable, Insertable)]
#[table_name = "proyectos"]
pub struct ProyectoData {
    pub id: String,
    pub id_programador: String,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub participacion: String,
    pub tecnologias: String,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(AsChangeset, Default)]
#[table_name = "proyectos"]
pub struct UpdateProyecto {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub tipo: Option<String>,
    pub participacion: Option<String>,
    pub tecnologias: Option<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagen_url: Option<String>,
}

pub const TIPO_ACADEMICO: &str = "academico";
pub const TIPO_LABORAL: &str = "laboral";

#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, info).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::proyectos::{TIPO_ACADEMICO, TIPO_LABORAL};

pub fn validar_tipo_proyecto(tipo: &str) -> anyhow::Result<()> {
    if tipo != TIPO_ACADEMICO && tipo != TIPO_LABORAL {
        bail!("Tipo de proyecto inválido");
    }
    Ok(())
}

pub fn validar_participacion(participacion: &str) -> anyhow::Result<()> {
    const PARTICIPACIONES: [&str; 4] = ["Frontend", "Backend", "Base de Datos", "Fullstack"];

    if !PARTICIPACIONES.contains(&participacion) {
        bail!("Participación inválida");
    }
    Ok(())
}

/// Valida una hora "HH:MM" con relleno de ceros; el motor de agenda
/// compara estas cadenas lexicográficamente y depende del ancho fijo.
pub fn validar_hora(hora: &str) -> anyhow::Result<()> {
    let bien_formada = hora.len() == 5
        && hora.as_bytes()[2] == b':'
        && NaiveTime::parse_from_str(hora, "%H:%M").is_ok();
    if !bien_formada {
        bail!("Hora inválida, se espera el formato HH:MM");
    }
    Ok(())
}

pub fn validar_fecha(fecha: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
        .context("Fecha inválida, se espera el formato YYYY-MM-DD")
}

pub fn combinar_fecha_hora(fecha: &str, hora: &str) -> anyhow::Result<NaiveDateTime> {
    let fecha = validar_fecha(fecha)?;
    validar_hora(hora)?;
    let hora = NaiveTime::parse_from_str(hora, "%H:%M").context("Hora inválida")?;
    Ok(fecha.and_time(hora))
}

/// Valida una franja plana "HH:MM-HH:MM"; la cadena vacía (día inactivo)
/// es válida.
pub fn validar_franja(franja: &str) -> anyhow::Result<()> {
    let franja = franja.trim();
    if franja.is_empty() {
        return Ok(());
    }

    let partes: Vec<&str> = franja.split('-').collect();
    if partes.len() != 2 {
        bail!("Franja inválida, se espera el formato HH:MM-HH:MM");
    }
    let inicio = partes[0].trim();
    let fin = partes[1].trim();
    validar_hora(inicio)?;
    validar_hora(fin)?;
    if inicio > fin {
        bail!("Franja inválida: la hora de inicio es posterior a la de fin");
    }
    Ok(())
}

pub fn tecnologias_a_lista(tecnologias: &str) -> Vec<String> {
    tecnologias
        .split(',')
        .map(|tecnologia| tecnologia.trim().to_string())
        .filter(|tecnologia| !tecnologia.is_empty())
        .collect()
}

pub fn lista_a_tecnologias(lista: &[String]) -> String {
    lista
        .iter()
        .map(|tecnologia| tecnologia.trim())
        .filter(|tecnologia| !tecnologia.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

pub fn get_str_pattern_opt<S: AsRef<str>>(s: Option<S>) -> String {
    match s {
        Some(s) => get_str_pattern(s),
        None => "%".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horas_bien_y_mal_formadas() {
        assert!(validar_hora("09:00").is_ok());
        assert!(validar_hora("23:59").is_ok());
        assert!(validar_hora("00:00").is_ok());

        assert!(validar_hora("9:00").is_err());
        assert!(validar_hora("24:00").is_err());
        assert!(validar_hora("09:60").is_err());
        assert!(validar_hora("0900").is_err());
        assert!(validar_hora("").is_err());
    }

    #[test]
    fn fechas_bien_y_mal_formadas() {
        assert!(validar_fecha("2024-02-29").is_ok());
        assert!(validar_fecha("2023-02-29").is_err());
        assert!(validar_fecha("15/06/2024").is_err());
    }

    #[test]
    fn combinar_fecha_y_hora() {
        let instante = combinar_fecha_hora("2024-06-16", "10:30").unwrap();
        assert_eq!(instante.to_string(), "2024-06-16 10:30:00");

        assert!(combinar_fecha_hora("2024-06-16", "10").is_err());
        assert!(combinar_fecha_hora("junio 16", "10:30").is_err());
    }

    #[test]
    fn franjas_validas_e_invalidas() {
        assert!(validar_franja("").is_ok());
        assert!(validar_franja("09:00-18:00").is_ok());
        assert!(validar_franja("10:00-10:00").is_ok());

        assert!(validar_franja("18:00-09:00").is_err());
        assert!(validar_franja("09:00").is_err());
        assert!(validar_franja("9:00-18:00").is_err());
    }

    #[test]
    fn tecnologias_ida_y_vuelta() {
        let lista = tecnologias_a_lista("Rust, Angular ,,  SQL ");
        assert_eq!(lista, vec!["Rust", "Angular", "SQL"]);
        assert_eq!(lista_a_tecnologias(&lista), "Rust,Angular,SQL");
        assert!(tecnologias_a_lista("").is_empty());
    }
}

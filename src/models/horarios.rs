use crate::agenda::{Dia, Disponibilidad, HorarioSemanal, VentanaGeneral};
use crate::schema::horarios;

#[derive(Queryable, Insertable)]
#[table_name = "horarios"]
pub struct HorarioData {
    pub uid: String,
    pub lunes: String,
    pub martes: String,
    pub miercoles: String,
    pub jueves: String,
    pub viernes: String,
    pub sabado: String,
    pub domingo: String,
    pub dias_generales: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
}

impl HorarioData {
    /// Fila recién creada: todos los días inactivos, sin forma general.
    pub fn inactivo(uid: String) -> Self {
        HorarioData {
            uid,
            lunes: String::new(),
            martes: String::new(),
            miercoles: String::new(),
            jueves: String::new(),
            viernes: String::new(),
            sabado: String::new(),
            domingo: String::new(),
            dias_generales: None,
            hora_inicio: None,
            hora_fin: None,
        }
    }

    pub fn cadenas(&self) -> [&str; 7] {
        [
            self.lunes.as_str(),
            self.martes.as_str(),
            self.miercoles.as_str(),
            self.jueves.as_str(),
            self.viernes.as_str(),
            self.sabado.as_str(),
            self.domingo.as_str(),
        ]
    }

    /// Resuelve la fila a la representación con que trabaja el motor de
    /// agenda. La forma por día manda en cuanto algún día tiene franja;
    /// si no, los campos generales heredados hacen de respaldo. Una fila
    /// sin nada en la forma general pero con los siete días vacíos es un
    /// horario configurado todo inactivo, no la ausencia de horario.
    pub fn disponibilidad(&self) -> Disponibilidad {
        let cadenas = self.cadenas();
        let por_dia = cadenas.iter().any(|cadena| !cadena.trim().is_empty());

        if !por_dia {
            if let Some(nombres) = &self.dias_generales {
                let dias: Vec<Dia> = nombres
                    .split(',')
                    .filter_map(Dia::desde_nombre)
                    .collect();
                if !dias.is_empty() {
                    return Disponibilidad::General(VentanaGeneral {
                        dias,
                        hora_inicio: self.hora_inicio.clone(),
                        hora_fin: self.hora_fin.clone(),
                    });
                }
            }
        }

        Disponibilidad::PorDia(HorarioSemanal::desde_cadenas(cadenas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::FranjaDia;

    fn fila() -> HorarioData {
        HorarioData::inactivo("PRG1".to_string())
    }

    #[test]
    fn fila_con_franjas_usa_la_forma_por_dia() {
        let mut fila = fila();
        fila.lunes = "09:00-12:00".to_string();
        fila.dias_generales = Some("Martes".to_string());

        match fila.disponibilidad() {
            Disponibilidad::PorDia(horario) => {
                assert_eq!(
                    horario.franja(Dia::Lunes),
                    &FranjaDia::activa("09:00", "12:00")
                );
                assert!(!horario.franja(Dia::Martes).activo);
            }
            Disponibilidad::General(_) => panic!("debió mandar la forma por día"),
        }
    }

    #[test]
    fn fila_vacia_con_dias_generales_usa_el_respaldo() {
        let mut fila = fila();
        fila.dias_generales = Some("Lunes,Miércoles,inválido".to_string());
        fila.hora_inicio = Some("09:00".to_string());
        fila.hora_fin = Some("17:00".to_string());

        match fila.disponibilidad() {
            Disponibilidad::General(ventana) => {
                assert_eq!(ventana.dias, vec![Dia::Lunes, Dia::Miercoles]);
                assert_eq!(ventana.hora_inicio.as_deref(), Some("09:00"));
            }
            Disponibilidad::PorDia(_) => panic!("debió usar el respaldo general"),
        }
    }

    #[test]
    fn fila_vacia_sin_respaldo_es_todo_inactivo() {
        match fila().disponibilidad() {
            Disponibilidad::PorDia(horario) => {
                for dia in Dia::TODOS.iter() {
                    assert!(!horario.franja(*dia).activo);
                }
            }
            Disponibilidad::General(_) => panic!("no hay forma general que usar"),
        }
    }

    #[test]
    fn dias_generales_sin_nombres_validos_no_cuenta_como_respaldo() {
        let mut fila = fila();
        fila.dias_generales = Some("".to_string());

        assert!(matches!(fila.disponibilidad(), Disponibilidad::PorDia(_)));
    }
}

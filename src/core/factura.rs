//! PDF invoice generation for paid orders.
//!
//! Invoices are rendered to `factura-<numero>.pdf` under the configured
//! directory. The filename depends only on the order's invoice number, so
//! regenerating an invoice overwrites the same file instead of accumulating
//! copies.

use crate::{
    core::ordenes::OrdenCompleta,
    errors::{Error, Result},
};
use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

const ANCHO_CARTA_MM: f32 = 215.9;
const ALTO_CARTA_MM: f32 = 279.4;
const MARGEN_MM: f32 = 20.0;

/// Breakdown printed in the invoice footer.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalesFactura {
    pub subtotal: f64,
    pub costo_envio: f64,
    pub total: f64,
}

/// Computes invoice totals from the order's line-item snapshots.
///
/// The sum of line subtotals is used rather than the order's `total` column,
/// so the printed breakdown always adds up even if the total was later edited.
pub fn calcular_totales(orden: &OrdenCompleta) -> TotalesFactura {
    let subtotal: f64 = orden.detalles.iter().map(|d| d.detalle.subtotal).sum();
    let costo_envio = orden.orden.costo_envio;
    TotalesFactura {
        subtotal,
        costo_envio,
        total: subtotal + costo_envio,
    }
}

/// Renders the PDF invoice for a paid order and returns the written path.
///
/// # Errors
/// [`Error::FacturaNoDisponible`] when the order has no invoice number yet
/// (i.e. it was never paid).
pub fn generar_factura(orden: &OrdenCompleta, directorio: &Path) -> Result<PathBuf> {
    let numero = orden
        .orden
        .numero_factura
        .as_deref()
        .ok_or(Error::FacturaNoDisponible {
            orden_id: orden.orden.id,
        })?;

    std::fs::create_dir_all(directorio)?;
    let ruta = directorio.join(format!("factura-{numero}.pdf"));

    let (doc, pagina, capa) = PdfDocument::new(
        format!("Factura {numero}"),
        Mm(ANCHO_CARTA_MM),
        Mm(ALTO_CARTA_MM),
        "Capa 1",
    );
    let capa = doc.get_page(pagina).get_layer(capa);
    let fuente = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Pdf {
            message: e.to_string(),
        })?;
    let fuente_negrita = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Pdf {
            message: e.to_string(),
        })?;

    let mut y = ALTO_CARTA_MM - MARGEN_MM;
    let escribir = |texto: &str, tamano: f32, negrita: bool, y: f32| {
        let f = if negrita { &fuente_negrita } else { &fuente };
        capa.use_text(texto, tamano, Mm(MARGEN_MM), Mm(y), f);
    };

    escribir("Tienda de Cámaras", 18.0, true, y);
    y -= 8.0;
    escribir(&format!("Factura {numero}"), 12.0, false, y);
    y -= 6.0;
    escribir(
        &format!("Fecha: {}", orden.orden.fecha_orden.format("%d/%m/%Y")),
        10.0,
        false,
        y,
    );
    y -= 6.0;

    let cliente = orden
        .usuario
        .as_ref()
        .map(|u| u.nombre.clone())
        .or_else(|| orden.orden.usuario_nombre.clone())
        .unwrap_or_else(|| "Cliente".to_string());
    escribir(&format!("Cliente: {cliente}"), 10.0, false, y);
    y -= 10.0;

    // Separator under the header
    capa.set_outline_thickness(0.5);
    capa.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGEN_MM), Mm(y)), false),
            (Point::new(Mm(ANCHO_CARTA_MM - MARGEN_MM), Mm(y)), false),
        ],
        is_closed: false,
    });
    y -= 8.0;

    escribir("Producto", 10.0, true, y);
    capa.use_text("Cant.", 10.0, Mm(110.0), Mm(y), &fuente_negrita);
    capa.use_text("Precio", 10.0, Mm(135.0), Mm(y), &fuente_negrita);
    capa.use_text("Subtotal", 10.0, Mm(165.0), Mm(y), &fuente_negrita);
    y -= 7.0;

    for linea in &orden.detalles {
        let nombre = linea
            .producto
            .as_ref()
            .map_or("Producto Desconocido", |p| p.nombre.as_str());
        capa.use_text(nombre, 10.0, Mm(MARGEN_MM), Mm(y), &fuente);
        capa.use_text(
            linea.detalle.cantidad.to_string(),
            10.0,
            Mm(110.0),
            Mm(y),
            &fuente,
        );
        capa.use_text(
            format!("${:.2}", linea.detalle.precio_unitario),
            10.0,
            Mm(135.0),
            Mm(y),
            &fuente,
        );
        capa.use_text(
            format!("${:.2}", linea.detalle.subtotal),
            10.0,
            Mm(165.0),
            Mm(y),
            &fuente,
        );
        y -= 6.0;
    }

    y -= 4.0;
    let totales = calcular_totales(orden);
    capa.use_text(
        format!("Subtotal: ${:.2}", totales.subtotal),
        10.0,
        Mm(135.0),
        Mm(y),
        &fuente,
    );
    y -= 6.0;
    capa.use_text(
        format!("Envío: ${:.2}", totales.costo_envio),
        10.0,
        Mm(135.0),
        Mm(y),
        &fuente,
    );
    y -= 7.0;
    capa.use_text(
        format!("Total: ${:.2}", totales.total),
        12.0,
        Mm(135.0),
        Mm(y),
        &fuente_negrita,
    );

    let archivo = File::create(&ruta)?;
    doc.save(&mut BufWriter::new(archivo))
        .map_err(|e| Error::Pdf {
            message: e.to_string(),
        })?;

    info!(numero_factura = numero, ruta = %ruta.display(), "factura generada");
    Ok(ruta)
}

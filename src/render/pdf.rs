use crate::config::{CompanyProfile, QuoteOptions};
use crate::domain::model::{format_money, Client, Quotation};
use crate::render::page::{rgb, text_width, wrap_text, PageComposer, MARGIN, PAGE_WIDTH};
use crate::utils::error::{QuoteError, Result};
use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::XObject;
use printpdf::{
    BuiltinFont, Layer, Mm, PdfConformance, PdfDocument, PdfPage, PdfSaveOptions, XObjectId,
};
use std::fs;

const REGULAR: BuiltinFont = BuiltinFont::Helvetica;
const BOLD: BuiltinFont = BuiltinFont::HelveticaBold;

const FONT_SIZE: f32 = 8.0;
const LEADING: f32 = 10.0;
const BAND_HEIGHT: f32 = 12.0;

const TABLE_X: f32 = MARGIN;
const TABLE_WIDTH: f32 = 504.0;
// CÓDIGO, DESCRIPCIÓN, CANT., VALOR, SUBTOTAL, IMPUESTO, TOTAL
const COL_WIDTHS: [f32; 7] = [50.4, 201.6, 36.0, 54.0, 54.0, 54.0, 54.0];
const TABLE_HEADERS: [&str; 7] = [
    "CÓDIGO",
    "DESCRIPCIÓN",
    "CANT.",
    "VALOR",
    "SUBTOTAL",
    "IMPUESTO",
    "TOTAL",
];

fn col_x(col: usize) -> f32 {
    TABLE_X + COL_WIDTHS[..col].iter().sum::<f32>()
}

fn teal() -> printpdf::color::Color {
    rgb(0x1C, 0x4E, 0x4E)
}

fn black() -> printpdf::color::Color {
    rgb(0, 0, 0)
}

fn white() -> printpdf::color::Color {
    rgb(255, 255, 255)
}

/// Renders one quotation into a PDF byte buffer with the fixed section
/// layout: header, client block, line-item table, totals row, terms,
/// signature and footer. One renderer covers both the logo-image and
/// text-fallback headers; the choice is configuration, not a code path fork.
pub struct QuoteRenderer {
    company: CompanyProfile,
    options: QuoteOptions,
}

impl QuoteRenderer {
    pub fn new(company: CompanyProfile, options: QuoteOptions) -> Self {
        Self { company, options }
    }

    pub fn render(&self, quotation: &Quotation) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(&format!("Cotización {}", quotation.id));
        doc.metadata.info.conformance = PdfConformance::X3_2002_PDF_1_3;

        let logo = self.load_logo(&mut doc);

        let mut page = PageComposer::new();
        self.draw_header(&mut page, quotation, logo);
        self.draw_client_block(&mut page, &quotation.client);
        self.draw_item_table(&mut page, quotation);
        self.draw_terms(&mut page);
        self.draw_signature(&mut page);
        self.draw_footer(&mut page);

        for (idx, ops) in page.into_pages().into_iter().enumerate() {
            let layer_name = format!("Page {} Layer 1", idx + 1);
            let layer = Layer::new(layer_name.as_str());
            let layer_id = doc.add_layer(&layer);
            let mut final_ops = vec![Op::BeginLayer { layer_id }];
            final_ops.extend(ops);
            doc.pages
                .push(PdfPage::new(Mm(215.9), Mm(279.4), final_ops));
        }

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if bytes.is_empty() {
            return Err(QuoteError::RenderError {
                message: "el archivo está vacío".to_string(),
            });
        }
        Ok(bytes)
    }

    /// Decodes the configured logo into a document XObject. Any failure falls
    /// back to the text header; a missing asset is never fatal.
    fn load_logo(&self, doc: &mut PdfDocument) -> Option<(XObjectId, (u32, u32))> {
        let path = self.company.logo.as_ref()?;
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    "logo {} unreadable, using text header instead: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };
        let mut warnings = Vec::new();
        let raw = match RawImage::decode_from_bytes(&bytes, &mut warnings) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "logo {} failed to decode, using text header instead: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };
        let dims = (raw.width as u32, raw.height as u32);
        let id = XObjectId::new();
        doc.resources
            .xobjects
            .map
            .insert(id.clone(), XObject::Image(raw));
        Some((id, dims))
    }

    fn draw_header(
        &self,
        page: &mut PageComposer,
        quotation: &Quotation,
        logo: Option<(XObjectId, (u32, u32))>,
    ) {
        let right_x = MARGIN + 324.0;

        let title_height = match logo {
            Some((id, dims)) => {
                page.image(id, MARGIN, page.y, 100.0, 28.0, dims);
                32.0
            }
            None => {
                page.text(MARGIN, page.y, 12.0, BOLD, black(), &self.company.name);
                16.0
            }
        };
        page.text(right_x, page.y, 12.0, BOLD, black(), "COTIZACIÓN");
        page.y += title_height;

        let date = quotation
            .date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string());

        let left_lines = [
            self.company.address.clone(),
            format!("Ciudad: {}", self.company.city),
            format!("Sitio Web: {}", self.company.website),
            format!("Teléfono: {}", self.company.phones),
            format!("E-mail: {}", self.company.email),
            format!("Asesor de venta: {}", self.company.sales_contact),
            self.company.bank_account.clone(),
            self.company.cci.clone(),
        ];
        let right_lines = [
            format!("FECHA: {}", date),
            format!("COTIZACIÓN #: {}", quotation.id),
            format!("CLIENTE ID: {}", quotation.client.tax_id),
            format!("VÁLIDO HASTA: {}", self.options.validity),
        ];

        for i in 0..left_lines.len().max(right_lines.len()) {
            if let Some(line) = left_lines.get(i) {
                page.text(MARGIN, page.y, FONT_SIZE, REGULAR, black(), line);
            }
            if let Some(line) = right_lines.get(i) {
                page.text(right_x, page.y, FONT_SIZE, REGULAR, black(), line);
            }
            page.y += LEADING;
        }
        page.y += 20.0;
    }

    fn draw_client_block(&self, page: &mut PageComposer, client: &Client) {
        page.ensure_room(BAND_HEIGHT + 5.0 * LEADING + 20.0);

        let top = page.y;
        page.filled_rect(TABLE_X, top, TABLE_WIDTH, BAND_HEIGHT, teal());
        page.text(TABLE_X + 2.0, top + 2.0, FONT_SIZE, BOLD, white(), "CLIENTE");
        page.y = top + BAND_HEIGHT;

        let rows = [
            ("Nombre:", &client.name),
            ("Email:", &client.email),
            ("Dirección:", &client.address),
            ("RUC:", &client.tax_id),
            ("Teléfono:", &client.phone),
        ];
        for (label, value) in rows {
            page.text(TABLE_X + 2.0, page.y + 1.0, FONT_SIZE, REGULAR, black(), label);
            page.text(
                TABLE_X + 108.0,
                page.y + 1.0,
                FONT_SIZE,
                REGULAR,
                black(),
                value,
            );
            page.y += LEADING;
        }
        page.y += 20.0;
    }

    fn draw_table_header(&self, page: &mut PageComposer) {
        let top = page.y;
        page.filled_rect(TABLE_X, top, TABLE_WIDTH, BAND_HEIGHT, teal());
        for (col, header) in TABLE_HEADERS.iter().enumerate() {
            if col == 1 {
                // Description stays left-aligned like its body cells.
                page.text(col_x(1) + 2.0, top + 2.0, FONT_SIZE, BOLD, white(), header);
            } else {
                self.centered_cell(page, col, top + 2.0, BOLD, white(), header);
            }
        }
        page.line(TABLE_X, top, TABLE_X + TABLE_WIDTH, top, 0.5);
        self.grid_row(page, top, BAND_HEIGHT);
        page.y = top + BAND_HEIGHT;
    }

    fn draw_item_table(&self, page: &mut PageComposer, quotation: &Quotation) {
        page.ensure_room(BAND_HEIGHT + 14.0);
        self.draw_table_header(page);

        let prefix = &self.options.currency_prefix;
        for item in &quotation.items {
            let amounts = item.amounts();
            let desc_lines = wrap_text(&item.description, FONT_SIZE, COL_WIDTHS[1] - 4.0);
            let row_height = (desc_lines.len() as f32 * LEADING + 4.0).max(14.0);

            if page.ensure_room(row_height) {
                // The table continues on a fresh page with its header row.
                self.draw_table_header(page);
            }
            let top = page.y;

            for (i, line) in desc_lines.iter().enumerate() {
                page.text(
                    col_x(1) + 2.0,
                    top + 2.0 + i as f32 * LEADING,
                    FONT_SIZE,
                    REGULAR,
                    black(),
                    line,
                );
            }
            // Code column is intentionally blank.
            let cells = [
                (2, item.quantity.to_string()),
                (3, format_money(prefix, item.unit_price)),
                (4, format_money(prefix, amounts.subtotal)),
                (5, format_money(prefix, amounts.tax)),
                (6, format_money(prefix, amounts.total)),
            ];
            for (col, content) in &cells {
                self.centered_cell(page, *col, top + 2.0, REGULAR, black(), content);
            }

            self.grid_row(page, top, row_height);
            page.y = top + row_height;
        }

        self.draw_totals_row(page, quotation);
        page.y += 20.0;
    }

    fn draw_totals_row(&self, page: &mut PageComposer, quotation: &Quotation) {
        let row_height = 14.0;
        if page.ensure_room(row_height) {
            self.draw_table_header(page);
        }
        let top = page.y;

        let label = "TOTAL";
        let label_x = col_x(6) - 4.0 - text_width(label, FONT_SIZE);
        page.text(label_x, top + 2.0, FONT_SIZE, BOLD, black(), label);

        let total = format_money(&self.options.currency_prefix, quotation.grand_total());
        self.centered_cell(page, 6, top + 2.0, BOLD, black(), &total);

        // The label cell spans every non-total column.
        page.line(TABLE_X, top + row_height, TABLE_X + TABLE_WIDTH, top + row_height, 0.5);
        page.line(TABLE_X, top, TABLE_X, top + row_height, 0.5);
        page.line(col_x(6), top, col_x(6), top + row_height, 0.5);
        page.line(
            TABLE_X + TABLE_WIDTH,
            top,
            TABLE_X + TABLE_WIDTH,
            top + row_height,
            0.5,
        );
        page.y = top + row_height;
    }

    fn draw_terms(&self, page: &mut PageComposer) {
        page.ensure_room(BAND_HEIGHT + 3.0 * LEADING + 30.0);

        let top = page.y;
        page.filled_rect(TABLE_X, top, TABLE_WIDTH, BAND_HEIGHT, teal());
        page.text(
            TABLE_X + 2.0,
            top + 2.0,
            FONT_SIZE,
            BOLD,
            white(),
            "TÉRMINOS Y CONDICIONES",
        );
        page.y = top + BAND_HEIGHT;

        let rows = [
            ("Fecha de entrega:", self.options.delivery_terms.as_str()),
            ("Forma de pago:", self.options.payment_terms.as_str()),
            ("", self.options.payment_note.as_str()),
        ];
        for (label, value) in rows {
            page.text(TABLE_X + 2.0, page.y + 1.0, FONT_SIZE, REGULAR, black(), label);
            page.text(
                TABLE_X + 144.0,
                page.y + 1.0,
                FONT_SIZE,
                REGULAR,
                black(),
                value,
            );
            page.y += LEADING;
        }
        page.y += 30.0;
    }

    fn draw_signature(&self, page: &mut PageComposer) {
        page.ensure_room(2.0 * LEADING + 20.0);

        let lines = ["_____________________", "Nombre del cliente:"];
        for line in lines {
            let x = (PAGE_WIDTH - text_width(line, FONT_SIZE)) / 2.0;
            page.text(x, page.y, FONT_SIZE, REGULAR, black(), line);
            page.y += LEADING;
        }
        page.y += 20.0;
    }

    fn draw_footer(&self, page: &mut PageComposer) {
        page.ensure_room(3.0 * LEADING);

        let contact = format!(
            "{} | Teléfono: {} | E-mail: {}",
            self.company.name, self.company.phones, self.company.email
        );
        let lines = [
            "Si usted tiene alguna pregunta sobre esta cotización, por favor, \
             póngase en contacto con nosotros",
            contact.as_str(),
            "¡Gracias por hacer trato con nosotros!",
        ];
        for line in lines {
            page.text(MARGIN, page.y, FONT_SIZE, REGULAR, black(), line);
            page.y += LEADING;
        }
    }

    fn centered_cell(
        &self,
        page: &mut PageComposer,
        col: usize,
        y_top: f32,
        font: BuiltinFont,
        color: printpdf::color::Color,
        content: &str,
    ) {
        let x = col_x(col) + (COL_WIDTHS[col] - text_width(content, FONT_SIZE)) / 2.0;
        page.text(x, y_top, FONT_SIZE, font, color, content);
    }

    fn grid_row(&self, page: &mut PageComposer, top: f32, height: f32) {
        page.line(TABLE_X, top + height, TABLE_X + TABLE_WIDTH, top + height, 0.5);
        let mut x = TABLE_X;
        for width in COL_WIDTHS {
            page.line(x, top, x, top + height, 0.5);
            x += width;
        }
        page.line(x, top, x, top + height, 0.5);
    }
}

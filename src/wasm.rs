//! WebAssembly bindings for tileposter

use wasm_bindgen::prelude::*;
use crate::layout::PosterLayout;
use crate::pages::PageDescriptor;
use crate::tile::Rect;
use crate::{Orientation, PaperSize, Poster, PosterError, SourceImage};

#[wasm_bindgen]
pub struct WasmPoster {
    poster: Poster,
}

fn to_js(err: PosterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
impl WasmPoster {
    /// Create a session for an image of the given pixel size.
    /// Grid and orientation start from the suggestion for the image's shape.
    #[wasm_bindgen(constructor)]
    pub fn new(pixel_width: u32, pixel_height: u32) -> Result<WasmPoster, JsValue> {
        let source = SourceImage::new(pixel_width, pixel_height).map_err(to_js)?;
        Ok(WasmPoster { poster: Poster::new(source) })
    }

    /// Accepts "a4", "a3" or "letter".
    #[wasm_bindgen]
    pub fn set_paper(&mut self, paper: &str) -> Result<(), JsValue> {
        let paper = match paper.to_ascii_lowercase().as_str() {
            "a4" => PaperSize::A4,
            "a3" => PaperSize::A3,
            "letter" => PaperSize::Letter,
            other => return Err(JsValue::from_str(&format!("Unknown paper size: {other}"))),
        };
        self.update(|poster| Ok(poster.with_paper(paper)))
    }

    #[wasm_bindgen]
    pub fn set_landscape(&mut self, landscape: bool) -> Result<(), JsValue> {
        let orientation = if landscape { Orientation::Landscape } else { Orientation::Portrait };
        self.update(|poster| Ok(poster.with_orientation(orientation)))
    }

    #[wasm_bindgen]
    pub fn set_grid(&mut self, rows: u32, cols: u32) -> Result<(), JsValue> {
        self.update(|poster| poster.with_grid(rows, cols))
    }

    #[wasm_bindgen]
    pub fn page_count(&self) -> usize {
        self.poster.layout().page_count()
    }

    /// Poster and fitted image dimensions in millimeters
    #[wasm_bindgen]
    pub fn layout(&self) -> Result<js_sys::Object, JsValue> {
        layout_object(self.poster.layout())
    }

    /// Every page descriptor in print order
    #[wasm_bindgen]
    pub fn pages(&self) -> Result<js_sys::Array, JsValue> {
        let array = js_sys::Array::new();
        for page in self.poster.pages() {
            array.push(&page_object(&page)?);
        }
        Ok(array)
    }
}

impl WasmPoster {
    fn update(&mut self, f: impl FnOnce(Poster) -> crate::Result<Poster>) -> Result<(), JsValue> {
        let next = f(self.poster.clone()).map_err(to_js)?;
        let layout = next.layout();
        web_sys::console::debug_1(&JsValue::from_str(&format!(
            "tileposter: {}x{} sheets, fill {:.1}%",
            layout.grid.rows,
            layout.grid.cols,
            layout.fill_efficiency * 100.0
        )));
        self.poster = next;
        Ok(())
    }
}

fn set(target: &js_sys::Object, key: &str, value: JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(target, &key.into(), &value)?;
    Ok(())
}

fn layout_object(layout: &PosterLayout) -> Result<js_sys::Object, JsValue> {
    let result = js_sys::Object::new();
    set(&result, "paper", layout.paper.name().into())?;
    set(&result, "landscape", (layout.orientation == Orientation::Landscape).into())?;
    set(&result, "rows", layout.grid.rows.into())?;
    set(&result, "cols", layout.grid.cols.into())?;
    set(&result, "sheetWidthMm", layout.sheet_width_mm.into())?;
    set(&result, "sheetHeightMm", layout.sheet_height_mm.into())?;
    set(&result, "posterWidthMm", layout.poster_width_mm.into())?;
    set(&result, "posterHeightMm", layout.poster_height_mm.into())?;
    set(&result, "drawWidthMm", layout.draw_width_mm.into())?;
    set(&result, "drawHeightMm", layout.draw_height_mm.into())?;
    set(&result, "fillEfficiency", layout.fill_efficiency.into())?;
    Ok(result)
}

fn rect_object(rect: &Rect) -> Result<js_sys::Object, JsValue> {
    let result = js_sys::Object::new();
    set(&result, "x", rect.x.into())?;
    set(&result, "y", rect.y.into())?;
    set(&result, "w", rect.w.into())?;
    set(&result, "h", rect.h.into())?;
    Ok(result)
}

fn page_object(page: &PageDescriptor) -> Result<js_sys::Object, JsValue> {
    let result = js_sys::Object::new();
    set(&result, "pageNumber", (page.page_number as u32).into())?;
    set(&result, "row", page.row.into())?;
    set(&result, "col", page.col.into())?;
    set(&result, "sourceCrop", rect_object(&page.source_crop)?.into())?;
    set(&result, "destDraw", rect_object(&page.dest_draw)?.into())?;
    set(&result, "sheetWidthMm", page.sheet_width_mm.into())?;
    set(&result, "sheetHeightMm", page.sheet_height_mm.into())?;
    set(&result, "caption", page.caption.as_str().into())?;
    Ok(result)
}

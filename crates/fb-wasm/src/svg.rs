//! SVG `<line>` surface for connection lines.
//!
//! Lines are appended to a host-provided `<svg>` container and removed from
//! it when their connection is destroyed.

use fb_core::{Line, LineId, LineSurface};
use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const STROKE: &str = "black";

/// Endpoint attributes for a line, in the order they are written.
pub(crate) fn endpoint_attributes(line: Line) -> [(&'static str, String); 4] {
    [
        ("x1", line.p0.x.to_string()),
        ("y1", line.p0.y.to_string()),
        ("x2", line.p1.x.to_string()),
        ("y2", line.p1.y.to_string()),
    ]
}

pub struct SvgLineSurface {
    document: Document,
    container: Element,
    lines: HashMap<LineId, Element>,
    next: u64,
}

impl SvgLineSurface {
    pub fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
            lines: HashMap::new(),
            next: 0,
        }
    }

    fn create(&self, line: Line) -> Result<Element, JsValue> {
        let el = self.document.create_element_ns(Some(SVG_NS), "line")?;
        for (name, value) in endpoint_attributes(line) {
            el.set_attribute(name, &value)?;
        }
        el.set_attribute("stroke", STROKE)?;
        self.container.append_child(&el)?;
        Ok(el)
    }
}

impl LineSurface for SvgLineSurface {
    fn draw_line(&mut self, line: Line) -> LineId {
        let id = LineId::from_raw(self.next);
        self.next += 1;
        match self.create(line) {
            Ok(el) => {
                self.lines.insert(id, el);
            }
            Err(e) => log::error!("could not draw connection line: {e:?}"),
        }
        id
    }

    fn update_line(&mut self, id: LineId, line: Line) {
        let Some(el) = self.lines.get(&id) else {
            return;
        };
        for (name, value) in endpoint_attributes(line) {
            if let Err(e) = el.set_attribute(name, &value) {
                log::error!("could not move connection line: {e:?}");
                return;
            }
        }
    }

    fn remove_line(&mut self, id: LineId) {
        if let Some(el) = self.lines.remove(&id) {
            el.remove();
        }
    }
}

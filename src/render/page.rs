use super::svg::escape_xml;
use crate::ui::tooltip::{Tooltip, OFFSET_X, OFFSET_Y};

const STYLE: &str = "body { font-family: Helvetica, Arial, sans-serif; margin: 0; }\n\
#container { display: flex; flex-direction: column; align-items: center; padding: 1rem; }\n\
#title, #description { margin: 0.4rem; text-align: center; }\n\
#error { color: #b00020; border: 1px solid #b00020; border-radius: 5px; padding: 1rem; max-width: 60rem; }\n";

/// Pointer handling for the tiles; mirrors `ui::tooltip::Tooltip`.
const SCRIPT: &str = r##"(function () {
  var tooltip = document.getElementById("tooltip");
  if (!tooltip) { return; }
  document.querySelectorAll("#map .tile").forEach(function (tile) {
    tile.addEventListener("mouseover", function () {
      tooltip.style.visibility = "visible";
    });
    tile.addEventListener("mousemove", function (event) {
      var d = tile.dataset;
      tooltip.setAttribute("data-value", d.value);
      tooltip.style.left = (event.pageX + __OFFSET_X__) + "px";
      tooltip.style.top = (event.pageY + __OFFSET_Y__) + "px";
      tooltip.textContent = "";
      ["Name: " + d.name, "Category: " + d.category, "Value: " + d.value].forEach(function (line, i) {
        if (i > 0) { tooltip.appendChild(document.createElement("br")); }
        tooltip.appendChild(document.createTextNode(line));
      });
      tooltip.style.visibility = "visible";
    });
    tile.addEventListener("mouseout", function () {
      tooltip.style.visibility = "hidden";
    });
  });
})();"##;

/// A complete page around the rendered legend and treemap.
pub fn render_page(
    title: &str,
    description: &str,
    legend_svg: &str,
    map_svg: &str,
    tooltip: &Tooltip,
) -> String {
    let script = SCRIPT
        .replace("__OFFSET_X__", &OFFSET_X.to_string())
        .replace("__OFFSET_Y__", &OFFSET_Y.to_string());
    let body = format!(
        "{legend_svg}\n{map_svg}\n</div>\n{}\n<script>\n{script}\n</script>",
        tooltip.to_html()
    );
    document(title, description, &body)
}

/// The page shown when the document could not be fetched or understood.
pub fn render_error_page(title: &str, description: &str, message: &str) -> String {
    let body = format!(
        "<div id=\"error\" role=\"alert\"><strong>Could not load the dataset.</strong><br>{}</div>\n</div>",
        escape_xml(message)
    );
    document(title, description, &body)
}

fn document(title: &str, description: &str, body: &str) -> String {
    let title = escape_xml(title);
    let description = escape_xml(description);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n<div id=\"container\">\n<h1 id=\"title\">{title}</h1>\n<h3 id=\"description\">{description}</h3>\n{body}\n</body>\n</html>\n"
    )
}

//! In-place rewriting of embedded image references to absolute URLs.

use crate::html::Node;

/// Rewrite every `img` source in the tree to `base_url + "/reports/" + src`.
///
/// Runs on the tree before segmentation and encoding. Note the prefix is
/// `/reports/`, not the `/reports/images/` used for the top-level
/// `image-url` field; the two rules are independently observable in output
/// and deliberately left distinct.
pub fn rewrite_image_urls(nodes: &mut [Node], base_url: &str) {
    for node in nodes {
        if let Node::Element(elem) = node {
            if elem.tag == "img" {
                let rewritten = elem
                    .attr("src")
                    .map(|src| format!("{base_url}/reports/{src}"));
                if let Some(src) = rewritten {
                    elem.set_attr("src", &src);
                }
            }
            rewrite_image_urls(&mut elem.children, base_url);
        }
    }
}

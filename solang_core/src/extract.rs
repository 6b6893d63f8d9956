use html5ever::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::Handle;
use markup5ever_rcdom::NodeData;
use markup5ever_rcdom::RcDom;

/// Return the text of every `<code>` element in `html`, in document order.
///
/// Nested `<code>` elements are reported as well, after their parent. Entity
/// references are decoded and markup inside the element is dropped, keeping
/// only its text.
pub fn extract_code_snippets(html: &str) -> Vec<String> {
	let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
	let mut snippets = vec![];
	collect_code(&dom.document, &mut snippets);

	snippets
}

fn collect_code(handle: &Handle, snippets: &mut Vec<String>) {
	if let NodeData::Element { ref name, .. } = handle.data {
		if &*name.local == "code" {
			let mut text = String::new();
			collect_text(handle, &mut text);
			snippets.push(text);
		}
	}

	for child in handle.children.borrow().iter() {
		collect_code(child, snippets);
	}
}

fn collect_text(handle: &Handle, text: &mut String) {
	if let NodeData::Text { ref contents } = handle.data {
		text.push_str(&contents.borrow());
	}

	for child in handle.children.borrow().iter() {
		collect_text(child, text);
	}
}

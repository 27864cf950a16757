//! PEG grammar classifying PLY header lines.
//!
//! Only the statements the converter interprets are distinguished, every other
//! header line (`ply`, `format`, `comment`, other elements, ...) is [`Line::Other`].

#[derive(Debug, PartialEq, Eq, Clone)]
/// A single classified header line.
pub enum Line<'a> {
    /// An `element vertex ...` line, holding its last token (the count, unparsed).
    ElementVertex(&'a str),
    /// A `property ...` line, holding its last token (the property name).
    Property(&'a str),
    /// The `end_header` terminator line.
    EndHeader,
    /// Any line without meaning to the converter.
    Other,
}

peg::parser!{pub grammar grammar() for str {

rule space() = [' '|'\t']+

rule token() -> &'input str
	= s:$((![' '|'\t'|'\n'|'\r'][_])+) { s }

rule line_break()
	= "\r\n" / ['\n'|'\r']

rule tail() -> Vec<&'input str>
	= ts:(space() t:token() { t })* { ts }

pub rule element_vertex() -> &'input str
	= "element" space() k:$("vertex") ts:tail() {
		ts.last().copied().unwrap_or(k)
	}

pub rule property() -> &'input str
	= k:$("property") ts:tail() {
		ts.last().copied().unwrap_or(k)
	}

pub rule end_header()
	= "end_header"

rule classified() -> Line<'input>
	= v:element_vertex() { Line::ElementVertex(v) }
	/ v:property() { Line::Property(v) }

// `element` and `property` must start the line, `end_header` may be padded
pub rule line() -> Line<'input>
	= l:classified() space()? line_break()? ![_] { l }
	/ space()? end_header() space()? line_break()? ![_] { Line::EndHeader }
	/ [_]* { Line::Other }

}}

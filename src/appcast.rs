//! Sparkle appcast generation.
//!
//! One single-item feed document per produced artifact, written to
//! `appcast.<tag>.xml` in the working directory. Re-runs overwrite; two
//! distinct artifacts never target the same feed filename because the tag is
//! the RID or installer variant tag, unique within a run.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;
use crate::package::Artifact;
use crate::version::ReleaseVersion;

const SPARKLE_NS: &str = "http://www.andymatuschak.org/xml-namespaces/sparkle";
const RELEASE_BASE_URL: &str = "https://github.com/JackZ2024/OpenUtau/releases/download";
const MEDIA_TYPE: &str = "application/octet-stream";

/// RFC-2822-style timestamp, e.g. `Fri, 29 Aug 2026 10:05:00 +0000`.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Enclosure URL for one artifact.
///
/// Fully determined by the version and artifact filename; an update client
/// can reconstruct it from the feed fields alone.
pub fn download_url(version: &ReleaseVersion, artifact_filename: &str) -> String {
    format!("{RELEASE_BASE_URL}/{version}/{artifact_filename}")
}

/// Feed filename for one artifact tag.
pub fn appcast_filename(tag: &str) -> String {
    format!("appcast.{tag}.xml")
}

/// Write the single-item feed for `artifact` into `dir`, overwriting any
/// previous file of the same name. Returns the path written.
pub fn write_appcast(version: &ReleaseVersion, artifact: &Artifact, dir: &Path) -> Result<PathBuf> {
    let pub_date = Local::now().format(PUB_DATE_FORMAT).to_string();
    let path = dir.join(appcast_filename(&artifact.tag));
    let file = File::create(&path)?;
    write_feed(BufWriter::new(file), version, artifact, &pub_date)?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

fn write_feed<W: std::io::Write>(
    out: W,
    version: &ReleaseVersion,
    artifact: &Artifact,
    pub_date: &str,
) -> Result<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:sparkle", SPARKLE_NS));
    xml.write_event(Event::Start(rss))?;

    xml.write_event(Event::Start(BytesStart::new("channel")))?;
    text_element(&mut xml, "title", "OpenUtau")?;
    text_element(&mut xml, "language", "en")?;

    xml.write_event(Event::Start(BytesStart::new("item")))?;
    text_element(&mut xml, "title", &format!("OpenUtau {version}"))?;
    text_element(&mut xml, "pubDate", pub_date)?;

    let url = download_url(version, &artifact.filename);
    let mut enclosure = BytesStart::new("enclosure");
    enclosure.push_attribute(("url", url.as_str()));
    enclosure.push_attribute(("sparkle:version", version.as_str()));
    enclosure.push_attribute(("sparkle:shortVersionString", version.as_str()));
    enclosure.push_attribute(("sparkle:os", artifact.os.sparkle_name()));
    enclosure.push_attribute(("type", MEDIA_TYPE));
    enclosure.push_attribute(("sparkle:signature", ""));
    xml.write_event(Event::Empty(enclosure))?;

    xml.write_event(Event::End(BytesEnd::new("item")))?;
    xml.write_event(Event::End(BytesEnd::new("channel")))?;
    xml.write_event(Event::End(BytesEnd::new("rss")))?;
    Ok(())
}

fn text_element<W: std::io::Write>(xml: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(value)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
